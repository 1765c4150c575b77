use crate::error::CoreError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// IndexPathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IndexPathError {
    #[error("index path is empty")]
    Empty,

    #[error("index path '{path}' has an empty step")]
    EmptyStep { path: String },

    #[error("index path '{path}' has an invalid step '{step}'")]
    InvalidStep { path: String, step: String },

    #[error("index path '{path}' must start with a field name")]
    MissingRoot { path: String },
}

impl From<IndexPathError> for CoreError {
    fn from(err: IndexPathError) -> Self {
        Self::index_definition(err.to_string())
    }
}

///
/// PathStep
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathStep {
    /// Record field, map key, or JSON object member.
    Field(String),
    /// `[]`: every element of an array.
    Elements,
    /// `keys()`: every key of a map.
    Keys,
    /// `values()`: every value of a map.
    Values,
}

impl PathStep {
    /// Whether this step expands one row into several index entries.
    #[must_use]
    pub const fn is_multi_key(&self) -> bool {
        !matches!(self, Self::Field(_))
    }
}

///
/// IndexPath
///
/// Parsed dot-separated index path, e.g. `address.city`, `tags[]`,
/// `attrs.keys()`, `attrs.values().score`.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IndexPath {
    steps: Vec<PathStep>,
}

impl IndexPath {
    pub fn parse(text: &str) -> Result<Self, IndexPathError> {
        if text.trim().is_empty() {
            return Err(IndexPathError::Empty);
        }

        let mut steps = Vec::new();
        for segment in text.split('.') {
            let segment = segment.trim();
            match segment {
                "" => {
                    return Err(IndexPathError::EmptyStep {
                        path: text.to_string(),
                    });
                }
                "keys()" => steps.push(PathStep::Keys),
                "values()" => steps.push(PathStep::Values),
                _ => {
                    let mut name = segment;
                    let mut elements = 0usize;
                    while let Some(stripped) = name.strip_suffix("[]") {
                        name = stripped;
                        elements += 1;
                    }
                    if name.is_empty() || name.contains(['[', ']', '(', ')']) {
                        return Err(IndexPathError::InvalidStep {
                            path: text.to_string(),
                            step: segment.to_string(),
                        });
                    }
                    steps.push(PathStep::Field(name.to_string()));
                    steps.extend(std::iter::repeat_n(PathStep::Elements, elements));
                }
            }
        }

        if !matches!(steps.first(), Some(PathStep::Field(_))) {
            return Err(IndexPathError::MissingRoot {
                path: text.to_string(),
            });
        }

        Ok(Self { steps })
    }

    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Top-level field name.
    #[must_use]
    pub fn root(&self) -> &str {
        match self.steps.first() {
            Some(PathStep::Field(name)) => name,
            _ => "",
        }
    }

    /// Position of the first multi-key step, if any.
    #[must_use]
    pub fn multi_key_position(&self) -> Option<usize> {
        self.steps.iter().position(PathStep::is_multi_key)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Field(name) => {
                    if index > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathStep::Elements => f.write_str("[]")?,
                PathStep::Keys => f.write_str(".keys()")?,
                PathStep::Values => f.write_str(".values()")?,
            }
        }

        Ok(())
    }
}
