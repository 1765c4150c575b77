use crate::{
    error::CoreError,
    index::{
        IndexPlan,
        path::PathStep,
        plan::{PlanField, PlanLeaf},
        project::project_json,
    },
    key::{KeyTuple, ordered::push_component},
    row::Row,
    value::Value,
};
use std::{borrow::Cow, collections::BTreeMap};
use tracing::trace;

static SQL_NULL: Value = Value::Null;
static EMPTY: Value = Value::Empty;
static JSON_NULL: Value = Value::JsonNull;

///
/// Member
///
/// One expansion unit of a multi-key container.
///

enum Member<'a> {
    /// Array element (or a lone JSON value treated as a one-element array).
    Element(&'a Value),
    /// Map entry; `keys()` reads the key and `values()` the value.
    Entry(&'a str, &'a Value),
    /// Container had nothing to expand; every multi-key path reads this.
    Marker(&'a Value),
}

impl IndexPlan {
    /// Derive the index key tuples one row contributes to this index.
    ///
    /// A row without multi-key paths yields exactly one tuple. A multi-key
    /// row yields one tuple per container element (or map entry), and
    /// exactly one marker tuple when the container is empty, missing, JSON
    /// null, or SQL null. Duplicate tuples collapse; the result is in key
    /// order.
    pub fn derive(&self, row: &Row) -> Result<Vec<KeyTuple>, CoreError> {
        Ok(self.derive_encoded(row)?.into_values().collect())
    }

    /// Derived tuples keyed by their encoded bytes.
    pub(crate) fn derive_encoded(
        &self,
        row: &Row,
    ) -> Result<BTreeMap<Vec<u8>, KeyTuple>, CoreError> {
        let mut keys = BTreeMap::new();

        match self.container() {
            None => {
                let components = self
                    .fields()
                    .iter()
                    .map(|field| Cow::Borrowed(evaluate(row, field.path.steps())))
                    .collect();
                self.insert_tuple(&mut keys, components)?;
            }
            Some(prefix) => {
                let position = prefix.len();
                let container = evaluate(row, prefix);

                // Paths without a multi-key step read the same value for every member.
                let fixed: Vec<Option<&Value>> = self
                    .fields()
                    .iter()
                    .map(|field| {
                        (field.path.multi_key_position().is_none())
                            .then(|| evaluate(row, field.path.steps()))
                    })
                    .collect();

                for member in expand(container, self.expands_elements()) {
                    let components = self
                        .fields()
                        .iter()
                        .zip(&fixed)
                        .map(|(field, fixed)| match fixed {
                            Some(value) => Cow::Borrowed(*value),
                            None => member_value(&member, field, position),
                        })
                        .collect();
                    self.insert_tuple(&mut keys, components)?;
                }
            }
        }

        trace!(index = %self.name(), keys = keys.len(), "derived index keys");

        Ok(keys)
    }

    fn insert_tuple(
        &self,
        keys: &mut BTreeMap<Vec<u8>, KeyTuple>,
        components: Vec<Cow<'_, Value>>,
    ) -> Result<(), CoreError> {
        let limits = self.limits();
        let mut encoded = Vec::new();
        let mut tuple = Vec::with_capacity(components.len());

        for (field, value) in self.fields().iter().zip(components) {
            let value = match field.leaf {
                PlanLeaf::Schema => value.into_owned(),
                PlanLeaf::Json(declared) => {
                    project_json(value.into_owned(), declared).map_err(|err| {
                        err.context(format!("index '{}' path '{}'", self.name(), field.path))
                    })?
                }
            };

            let start = encoded.len();
            push_component(&mut encoded, &value)?;
            let size = encoded.len() - start;
            if size > limits.max_component_size {
                return Err(CoreError::index_constraint(format!(
                    "index '{}' path '{}': key component of {size} bytes exceeds the limit of {}",
                    self.name(),
                    field.path,
                    limits.max_component_size
                )));
            }
            tuple.push(value);
        }

        keys.entry(encoded).or_insert_with(|| KeyTuple::new(tuple));
        if keys.len() > limits.max_keys_per_row {
            return Err(CoreError::index_constraint(format!(
                "index '{}': row contributes more than {} keys",
                self.name(),
                limits.max_keys_per_row
            )));
        }

        Ok(())
    }
}

// Value at `steps` from the row. Unset and SQL-null fields read as SQL
// null; a missing record field, map key, or JSON member reads as EMPTY.
fn evaluate<'a>(row: &'a Row, steps: &[PathStep]) -> &'a Value {
    let Some(PathStep::Field(root)) = steps.first() else {
        return &EMPTY;
    };
    match row.get(root) {
        Value::Absent | Value::Null => &SQL_NULL,
        value => descend(value, &steps[1..]),
    }
}

fn descend<'a>(mut current: &'a Value, steps: &[PathStep]) -> &'a Value {
    for step in steps {
        current = match (current, step) {
            (Value::Null | Value::Absent, _) => return &SQL_NULL,
            (Value::Empty, _) => return &EMPTY,
            (Value::JsonNull, _) => return &JSON_NULL,
            (Value::Record(fields) | Value::Map(fields), PathStep::Field(name)) => {
                match lookup(fields, name) {
                    Some(value) => value,
                    None => return &EMPTY,
                }
            }
            _ => return &EMPTY,
        };
    }

    current
}

fn lookup<'a>(entries: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

// Expansion units of a multi-key container.
fn expand(container: &Value, elements: bool) -> Vec<Member<'_>> {
    let members: Vec<Member<'_>> = match container {
        Value::Null | Value::Absent => return vec![Member::Marker(&SQL_NULL)],
        Value::JsonNull => return vec![Member::Marker(&JSON_NULL)],
        Value::Empty => Vec::new(),
        Value::Array(items) if elements => items.iter().map(Member::Element).collect(),
        Value::Map(entries) if !elements => entries
            .iter()
            .map(|(key, value)| Member::Entry(key, value))
            .collect(),
        // A lone JSON value under `[]` is a one-element array.
        value if elements => vec![Member::Element(value)],
        _ => Vec::new(),
    };

    if members.is_empty() {
        return vec![Member::Marker(&EMPTY)];
    }

    members
}

// Value one multi-key path reads from one container member.
fn member_value<'a>(member: &Member<'a>, field: &PlanField, position: usize) -> Cow<'a, Value> {
    let steps = field.path.steps();
    let rest = &steps[position + 1..];

    match (member, &steps[position]) {
        (Member::Marker(marker), _) => Cow::Borrowed(*marker),
        (Member::Element(value), _) | (Member::Entry(_, value), PathStep::Values) => {
            Cow::Borrowed(descend(*value, rest))
        }
        (Member::Entry(key, _), _) => Cow::Owned(Value::String((*key).to_string())),
    }
}
