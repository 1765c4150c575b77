use crate::{
    error::{CoreError, ErrorOrigin},
    key::KeyTuple,
    model::TableModel,
    value::Value,
};
use std::sync::Arc;

static ABSENT: Value = Value::Absent;

///
/// Row
///
/// Field values of one row, positionally aligned with the table's fields.
/// Unset fields hold `Absent`. Every stored value has passed its field's
/// descriptor; setters replace the stored value wholesale.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    table: Arc<TableModel>,
    values: Vec<Value>,
}

impl Row {
    #[must_use]
    pub fn new(table: Arc<TableModel>) -> Self {
        let values = vec![Value::Absent; table.fields().len()];

        Self { table, values }
    }

    #[must_use]
    pub const fn table(&self) -> &Arc<TableModel> {
        &self.table
    }

    /// Validate `value` against the field's descriptor and store the
    /// converted result.
    pub fn put(&mut self, name: &str, value: impl Into<Value>) -> Result<(), CoreError> {
        let position = self.position(name)?;
        let descriptor = &self.table.fields()[position].descriptor;
        let value = descriptor
            .create_value(value.into())
            .map_err(|err| err.context(format!("field '{name}'")))?;
        self.values[position] = value;

        Ok(())
    }

    /// Store SQL null; fails unless the field is nullable.
    pub fn put_null(&mut self, name: &str) -> Result<(), CoreError> {
        self.put(name, Value::Null)
    }

    /// Parse JSON text into the field's declared type and store it.
    pub fn put_json(&mut self, name: &str, text: &str) -> Result<(), CoreError> {
        let position = self.position(name)?;
        let descriptor = &self.table.fields()[position].descriptor;
        let json = serde_json::from_str(text).map_err(|err| {
            CoreError::validation(
                ErrorOrigin::Row,
                format!("field '{name}': invalid JSON: {err}"),
            )
        })?;
        let value = descriptor
            .value_from_json(&json)
            .map_err(|err| err.context(format!("field '{name}'")))?;
        self.values[position] = value;

        Ok(())
    }

    /// Stored value; `Absent` when the field is unset or unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> &Value {
        self.table
            .fields()
            .iter()
            .position(|field| field.name == name)
            .map_or(&ABSENT, |position| &self.values[position])
    }

    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).is_null()
    }

    /// Fill every unset field from its default, else SQL null when
    /// nullable. Fails without changing the row when a required field has
    /// neither.
    pub fn apply_defaults(&mut self) -> Result<(), CoreError> {
        let mut filled = Vec::new();
        for (position, field) in self.table.fields().iter().enumerate() {
            if self.values[position].is_absent() {
                let value = field
                    .descriptor
                    .missing_value()
                    .map_err(|err| err.context(format!("field '{}'", field.name)))?;
                filled.push((position, value));
            }
        }

        for (position, value) in filled {
            self.values[position] = value;
        }

        Ok(())
    }

    /// Primary-key components in declared order; every key field must be
    /// set.
    pub fn primary_key(&self) -> Result<KeyTuple, CoreError> {
        let components = self
            .table
            .primary_key()
            .iter()
            .map(|name| {
                let value = self.get(name);
                if value.is_sentinel() {
                    return Err(CoreError::validation(
                        ErrorOrigin::Row,
                        format!("primary-key field '{name}' is not set"),
                    ));
                }
                Ok(value.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KeyTuple::new(components))
    }

    /// `(name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.table
            .fields()
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| (field.name.as_str(), value))
    }

    fn position(&self, name: &str) -> Result<usize, CoreError> {
        self.table
            .fields()
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| {
                CoreError::validation(
                    ErrorOrigin::Row,
                    format!("table '{}' has no field '{name}'", self.table.name()),
                )
            })
    }
}
