use crate::{
    error::CoreError,
    key::ordered::{OrderedDecodeError, push_component, take_component},
    model::TypeDescriptor,
    value::Value,
};
use derive_more::{Deref, IntoIterator};

///
/// KeyTuple
///
/// Ordered key components of one index entry (or primary key). The encoded
/// form is the concatenation of the components' sortable encodings, so
/// tuples compare component by component.
///

#[derive(Clone, Debug, Deref, Eq, Hash, IntoIterator, PartialEq)]
pub struct KeyTuple(Vec<Value>);

impl KeyTuple {
    #[must_use]
    pub const fn new(components: Vec<Value>) -> Self {
        Self(components)
    }

    #[must_use]
    pub fn components(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn into_components(self) -> Vec<Value> {
        self.0
    }

    /// Concatenated sortable encoding of every component.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;

        Ok(out)
    }

    /// Append the encoding to `out`; on failure `out` is left unchanged.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CoreError> {
        let start = out.len();
        for component in &self.0 {
            if let Err(err) = push_component(out, component) {
                out.truncate(start);
                return Err(err.into());
            }
        }

        Ok(())
    }

    /// Decode a tuple with one component per descriptor. Every byte of
    /// `bytes` must be consumed.
    pub fn decode(bytes: &[u8], descriptors: &[&TypeDescriptor]) -> Result<Self, CoreError> {
        let mut input = bytes;
        let components = Self::take(&mut input, descriptors)?;
        if !input.is_empty() {
            return Err(OrderedDecodeError::TrailingBytes(input.len()).into());
        }

        Ok(components)
    }

    /// Decode a tuple prefix from the front of `input`, advancing it.
    pub fn take(input: &mut &[u8], descriptors: &[&TypeDescriptor]) -> Result<Self, CoreError> {
        let components = descriptors
            .iter()
            .map(|descriptor| take_component(input, descriptor))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(components))
    }
}

impl From<Vec<Value>> for KeyTuple {
    fn from(components: Vec<Value>) -> Self {
        Self(components)
    }
}
