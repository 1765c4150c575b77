use crate::{
    error::{CoreError, ErrorOrigin},
    value::{Value, compare},
};
use regex::Regex;
use std::{cmp::Ordering, fmt};
use tabledb_primitives::FieldKind;

///
/// Constraint
///
/// Value restriction carried by a type descriptor and checked by
/// `create_value` after the value has been converted to the declared kind.
///

#[derive(Clone, Debug)]
pub enum Constraint {
    /// Inclusive numeric bounds; either side may be open.
    Range {
        min: Option<Value>,
        max: Option<Value>,
    },
    /// Inclusive string length bounds, in characters.
    Length { min: usize, max: Option<usize> },
    /// Whole-string regular expression match.
    Pattern(Pattern),
}

impl Constraint {
    pub fn range(min: Option<Value>, max: Option<Value>) -> Result<Self, CoreError> {
        for bound in min.iter().chain(max.iter()) {
            if !bound.is_numeric() {
                return Err(CoreError::validation(
                    ErrorOrigin::Descriptor,
                    format!("range bound {bound} is not numeric"),
                ));
            }
        }
        if let (Some(min), Some(max)) = (&min, &max)
            && compare(min, max)? == Ordering::Greater
        {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                format!("range minimum {min} exceeds maximum {max}"),
            ));
        }

        Ok(Self::Range { min, max })
    }

    pub fn length(min: usize, max: Option<usize>) -> Result<Self, CoreError> {
        if max.is_some_and(|max| max < min) {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                format!("length minimum {min} exceeds maximum"),
            ));
        }

        Ok(Self::Length { min, max })
    }

    pub fn pattern(source: &str) -> Result<Self, CoreError> {
        Pattern::new(source).map(Self::Pattern)
    }

    /// Whether a descriptor of `kind` can carry this constraint.
    #[must_use]
    pub const fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Self::Range { .. } => kind.is_numeric(),
            Self::Length { .. } | Self::Pattern(_) => matches!(kind, FieldKind::String),
        }
    }

    /// Check an already-converted, non-null value.
    pub(crate) fn check(&self, value: &Value) -> Result<(), CoreError> {
        match (self, value) {
            (Self::Range { min, max }, _) => {
                if let Some(min) = min
                    && compare(value, min)? == Ordering::Less
                {
                    return Err(violation(value, self));
                }
                if let Some(max) = max
                    && compare(value, max)? == Ordering::Greater
                {
                    return Err(violation(value, self));
                }
                Ok(())
            }
            (Self::Length { min, max }, Value::String(text)) => {
                let len = text.chars().count();
                if len < *min || max.is_some_and(|max| len > max) {
                    return Err(violation(value, self));
                }
                Ok(())
            }
            (Self::Pattern(pattern), Value::String(text)) => {
                if !pattern.is_match(text) {
                    return Err(violation(value, self));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn violation(value: &Value, constraint: &Constraint) -> CoreError {
    CoreError::validation(
        ErrorOrigin::Value,
        format!("value {value} violates constraint {constraint}"),
    )
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Range { min, max },
                Self::Range {
                    min: other_min,
                    max: other_max,
                },
            ) => min == other_min && max == other_max,
            (
                Self::Length { min, max },
                Self::Length {
                    min: other_min,
                    max: other_max,
                },
            ) => min == other_min && max == other_max,
            (Self::Pattern(a), Self::Pattern(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } => {
                let min = min.as_ref().map_or_else(|| "*".to_string(), Value::to_string);
                let max = max.as_ref().map_or_else(|| "*".to_string(), Value::to_string);
                write!(f, "range[{min}, {max}]")
            }
            Self::Length { min, max } => match max {
                Some(max) => write!(f, "length[{min}, {max}]"),
                None => write!(f, "length[{min}, *]"),
            },
            Self::Pattern(pattern) => write!(f, "pattern /{}/", pattern.source()),
        }
    }
}

///
/// Pattern
///
/// Compiled whole-string regex; equality is by source text.
///

#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, CoreError> {
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|err| {
            CoreError::validation(
                ErrorOrigin::Descriptor,
                format!("invalid pattern '{source}': {err}"),
            )
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}
