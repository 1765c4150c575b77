use crate::{
    MAX_INDEX_COMPONENT_SIZE, MAX_INDEX_FIELDS, MAX_KEYS_PER_ROW,
    error::{CoreError, ErrorClass, ErrorOrigin},
};
use serde::Deserialize;

///
/// IndexLimits
///
/// Bounds enforced while defining indexes and deriving index keys.
/// Unspecified fields fall back to the crate constants.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IndexLimits {
    /// Maximum number of fields in one index.
    pub max_index_fields: usize,
    /// Maximum encoded size of one key component, in bytes.
    pub max_component_size: usize,
    /// Maximum number of tuples one row may contribute to one index.
    pub max_keys_per_row: usize,
}

impl IndexLimits {
    /// Load limits from JSON text, e.g. `{"max_keys_per_row": 64}`.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let limits: Self = serde_json::from_str(text).map_err(|err| {
            CoreError::new(
                ErrorClass::Validation,
                ErrorOrigin::Index,
                format!("invalid index limits: {err}"),
            )
        })?;

        if limits.max_index_fields == 0
            || limits.max_component_size == 0
            || limits.max_keys_per_row == 0
        {
            return Err(CoreError::new(
                ErrorClass::Validation,
                ErrorOrigin::Index,
                "index limits must be positive",
            ));
        }

        Ok(limits)
    }
}

impl Default for IndexLimits {
    fn default() -> Self {
        Self {
            max_index_fields: MAX_INDEX_FIELDS,
            max_component_size: MAX_INDEX_COMPONENT_SIZE,
            max_keys_per_row: MAX_KEYS_PER_ROW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let limits = IndexLimits::from_json(r#"{"max_keys_per_row": 64}"#).expect("limits");
        assert_eq!(limits.max_keys_per_row, 64);
        assert_eq!(limits.max_index_fields, MAX_INDEX_FIELDS);
        assert_eq!(limits.max_component_size, MAX_INDEX_COMPONENT_SIZE);
    }

    #[test]
    fn unknown_and_zero_fields_are_rejected() {
        assert!(IndexLimits::from_json(r#"{"max_rows": 1}"#).is_err());
        assert!(IndexLimits::from_json(r#"{"max_index_fields": 0}"#).is_err());
    }
}
