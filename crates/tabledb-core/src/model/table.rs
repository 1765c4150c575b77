use crate::{
    config::IndexLimits,
    error::{CoreError, ErrorClass, ErrorOrigin},
    index::IndexPlan,
    model::{descriptor::TypeDescriptor, index::IndexModel},
};
use std::fmt;

///
/// FieldModel
/// One top-level column: name plus declared type.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldModel {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

///
/// TableModel
///
/// Runtime table definition: ordered fields, the primary-key field list,
/// and index definitions. Validated as a whole at construction; immutable
/// afterwards and shared behind `Arc`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TableModel {
    name: String,
    fields: Vec<FieldModel>,
    primary_key: Vec<String>,
    indexes: Vec<IndexModel>,
}

impl TableModel {
    pub fn new<S>(
        name: impl Into<String>,
        fields: Vec<(S, TypeDescriptor)>,
        primary_key: Vec<S>,
        indexes: Vec<IndexModel>,
    ) -> Result<Self, CoreError>
    where
        S: Into<String>,
    {
        let name = name.into();
        let fields: Vec<FieldModel> = fields
            .into_iter()
            .map(|(name, descriptor)| FieldModel {
                name: name.into(),
                descriptor,
            })
            .collect();

        for (index, field) in fields.iter().enumerate() {
            if field.name.is_empty() || fields[..index].iter().any(|f| f.name == field.name) {
                return Err(definition(format!(
                    "table '{name}': field '{}' is empty or duplicated",
                    field.name
                )));
            }
        }

        let primary_key: Vec<String> = primary_key.into_iter().map(Into::into).collect();
        if primary_key.is_empty() {
            return Err(definition(format!("table '{name}' requires a primary key")));
        }
        for key in &primary_key {
            let Some(field) = fields.iter().find(|f| &f.name == key) else {
                return Err(definition(format!(
                    "table '{name}': primary-key field '{key}' does not exist"
                )));
            };
            let kind = field.descriptor.kind();
            if !kind.is_key_encodable() || field.descriptor.is_nullable() {
                return Err(definition(format!(
                    "table '{name}': primary-key field '{key}' must be a non-nullable key-encodable kind, found {}",
                    field.descriptor
                )));
            }
        }

        let mut model = Self {
            name,
            fields,
            primary_key,
            indexes: Vec::new(),
        };
        for index in indexes {
            model.add_index(index, &IndexLimits::default())?;
        }

        Ok(model)
    }

    /// Validate and append an index definition.
    pub(crate) fn add_index(
        &mut self,
        index: IndexModel,
        limits: &IndexLimits,
    ) -> Result<IndexPlan, CoreError> {
        if self.index(&index.name).is_some() {
            return Err(definition(format!(
                "table '{}': index '{}' already exists",
                self.name, index.name
            )));
        }

        let plan = IndexPlan::new(self, &index, limits)?;
        self.indexes.push(index);

        Ok(plan)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.descriptor)
    }

    #[must_use]
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    #[must_use]
    pub fn indexes(&self) -> &[IndexModel] {
        &self.indexes
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexModel> {
        self.indexes.iter().find(|index| index.name == name)
    }
}

fn definition(message: String) -> CoreError {
    CoreError::new(ErrorClass::Definition, ErrorOrigin::Descriptor, message)
}

impl fmt::Display for TableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TABLE {}(", self.name)?;
        for field in &self.fields {
            write!(f, "{} {}, ", field.name, field.descriptor)?;
        }
        write!(f, "PRIMARY KEY({}))", self.primary_key.join(", "))
    }
}
