use crate::{error::CoreError, key::KeyTuple, model::TypeDescriptor};

///
/// IndexKey
///
/// Physical index entry: the derived key tuple followed by the row's
/// primary key, so entries with equal index values stay unique and sort by
/// primary key.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IndexKey {
    tuple: KeyTuple,
    primary_key: KeyTuple,
}

impl IndexKey {
    #[must_use]
    pub const fn new(tuple: KeyTuple, primary_key: KeyTuple) -> Self {
        Self { tuple, primary_key }
    }

    #[must_use]
    pub const fn tuple(&self) -> &KeyTuple {
        &self.tuple
    }

    #[must_use]
    pub const fn primary_key(&self) -> &KeyTuple {
        &self.primary_key
    }

    /// `encode(tuple) ++ encode(primary key)`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let mut out = self.tuple.encode()?;
        self.primary_key.encode_into(&mut out)?;

        Ok(out)
    }

    /// Split physical bytes back into tuple and primary key.
    pub fn from_bytes(
        bytes: &[u8],
        index: &[&TypeDescriptor],
        primary_key: &[&TypeDescriptor],
    ) -> Result<Self, CoreError> {
        let mut input = bytes;
        let tuple = KeyTuple::take(&mut input, index)?;
        let primary_key = KeyTuple::decode(input, primary_key)?;

        Ok(Self { tuple, primary_key })
    }
}
