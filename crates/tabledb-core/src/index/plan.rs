use crate::{
    config::IndexLimits,
    error::CoreError,
    index::path::{IndexPath, PathStep},
    model::{FieldType, IndexField, IndexModel, JsonIndexType, TableModel, TypeDescriptor},
};

///
/// PlanLeaf
///
/// What an index path resolves to once every step has been applied.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PlanLeaf {
    /// A schema-typed atomic value, indexed as stored.
    Schema,
    /// A value inside a JSON document, projected to the declared type.
    Json(JsonIndexType),
}

///
/// PlanField
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlanField {
    pub(crate) path: IndexPath,
    pub(crate) leaf: PlanLeaf,
    pub(crate) key_descriptor: TypeDescriptor,
}

///
/// IndexPlan
///
/// An index definition validated against a table: every path resolved,
/// leaf types fixed, and the shared multi-key container (if any) located.
/// Built once at definition time and reused for every row.
///

#[derive(Clone, Debug, PartialEq)]
pub struct IndexPlan {
    name: String,
    fields: Vec<PlanField>,
    // Steps leading to the multi-key container, shared by every multi-key path.
    container: Option<Vec<PathStep>>,
    // Multi-key step applied to the container: `[]`, `keys()`, or `values()`.
    container_step: Option<PathStep>,
    limits: IndexLimits,
}

// Schema position reached while resolving a path.
enum Node<'a> {
    Schema(&'a TypeDescriptor),
    Json,
    MapKey { json: bool },
}

impl<'a> Node<'a> {
    fn of(descriptor: &'a TypeDescriptor) -> Self {
        match descriptor.ty() {
            FieldType::Json => Self::Json,
            _ => Self::Schema(descriptor),
        }
    }
}

impl IndexPlan {
    pub fn new(
        table: &TableModel,
        index: &IndexModel,
        limits: &IndexLimits,
    ) -> Result<Self, CoreError> {
        let context = |message: String| {
            CoreError::index_definition(format!("index '{}': {message}", index.name))
        };

        if index.name.is_empty() {
            return Err(CoreError::index_definition("index name is empty"));
        }
        if index.fields.is_empty() {
            return Err(context("index requires at least one field".to_string()));
        }
        if index.fields.len() > limits.max_index_fields {
            return Err(context(format!(
                "{} fields exceed the limit of {}",
                index.fields.len(),
                limits.max_index_fields
            )));
        }

        let mut fields: Vec<PlanField> = Vec::with_capacity(index.fields.len());
        let mut container: Option<Vec<PathStep>> = None;
        let mut container_step: Option<PathStep> = None;

        for field in &index.fields {
            let plan_field = Self::resolve_field(table, field).map_err(|err| {
                CoreError::index_definition(format!("index '{}': {}", index.name, err.message))
            })?;

            if fields.iter().any(|existing| existing.path == plan_field.path) {
                return Err(context(format!("duplicate path '{}'", plan_field.path)));
            }

            let steps = plan_field.path.steps();
            let multi_key: Vec<usize> = steps
                .iter()
                .enumerate()
                .filter(|(_, step)| step.is_multi_key())
                .map(|(position, _)| position)
                .collect();
            if multi_key.len() > 1 {
                return Err(context(format!(
                    "path '{}' has more than one multi-key step",
                    plan_field.path
                )));
            }

            if let Some(&position) = multi_key.first() {
                let prefix = steps[..position].to_vec();
                let step = steps[position].clone();
                match (&container, &container_step) {
                    (None, _) => {
                        container = Some(prefix);
                        container_step = Some(step);
                    }
                    (Some(existing), Some(existing_step)) => {
                        let same_family = (*existing_step == PathStep::Elements)
                            == (step == PathStep::Elements);
                        if *existing != prefix || !same_family {
                            return Err(context(format!(
                                "multi-key path '{}' does not share the index's multi-key container",
                                plan_field.path
                            )));
                        }
                    }
                    (Some(_), None) => {}
                }
            }

            fields.push(plan_field);
        }

        Ok(Self {
            name: index.name.clone(),
            fields,
            container,
            container_step,
            limits: *limits,
        })
    }

    fn resolve_field(table: &TableModel, field: &IndexField) -> Result<PlanField, CoreError> {
        let path = IndexPath::parse(&field.path)?;
        let root = table.field(path.root()).ok_or_else(|| {
            CoreError::index_definition(format!(
                "path '{path}': table '{}' has no field '{}'",
                table.name(),
                path.root()
            ))
        })?;

        let mut node = Node::of(root);
        for step in &path.steps()[1..] {
            node = match (node, step) {
                (Node::Json, PathStep::Keys) => Node::MapKey { json: true },
                (Node::Json, _) => Node::Json,
                (Node::MapKey { .. }, _) => {
                    return Err(CoreError::index_definition(format!(
                        "path '{path}': keys() must be the last step"
                    )));
                }
                (Node::Schema(descriptor), step) => match (descriptor.ty(), step) {
                    (FieldType::Record(def), PathStep::Field(name)) => {
                        Node::of(def.field(name).ok_or_else(|| {
                            CoreError::index_definition(format!(
                                "path '{path}': record has no field '{name}'"
                            ))
                        })?)
                    }
                    (FieldType::Map(element), PathStep::Field(_) | PathStep::Values) => {
                        Node::of(element)
                    }
                    (FieldType::Map(_), PathStep::Keys) => Node::MapKey { json: false },
                    (FieldType::Array(element), PathStep::Elements) => Node::of(element),
                    (ty, step) => {
                        return Err(CoreError::index_definition(format!(
                            "path '{path}': step {step:?} does not apply to {ty}"
                        )));
                    }
                },
            };
        }

        let (leaf, key_descriptor) = match (node, field.declared) {
            (Node::Json, Some(declared)) => (PlanLeaf::Json(declared), declared_descriptor(declared)),
            (Node::MapKey { json: true }, Some(JsonIndexType::String)) => (
                PlanLeaf::Json(JsonIndexType::String),
                declared_descriptor(JsonIndexType::String),
            ),
            (Node::MapKey { json: false }, None) => (PlanLeaf::Schema, TypeDescriptor::string()),
            (Node::Schema(descriptor), None) => {
                let kind = descriptor.kind();
                if !kind.is_atomic() || !kind.is_key_encodable() {
                    return Err(CoreError::index_definition(format!(
                        "path '{path}': {} is not an indexable type",
                        descriptor.ty()
                    )));
                }
                (PlanLeaf::Schema, descriptor.clone())
            }
            (Node::Json | Node::MapKey { json: true }, None) => {
                return Err(CoreError::index_definition(format!(
                    "path '{path}' reaches into JSON and must declare a type"
                )));
            }
            (Node::MapKey { json: true }, Some(declared)) => {
                return Err(CoreError::index_definition(format!(
                    "path '{path}': JSON object keys are strings and cannot be indexed as {declared}"
                )));
            }
            (Node::Schema(_) | Node::MapKey { json: false }, Some(declared)) => {
                return Err(CoreError::index_definition(format!(
                    "path '{path}' is schema-typed and cannot declare type {declared}"
                )));
            }
        };

        Ok(PlanField {
            path,
            leaf,
            key_descriptor,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn limits(&self) -> &IndexLimits {
        &self.limits
    }

    /// Parsed paths in key-component order.
    pub fn paths(&self) -> impl Iterator<Item = &IndexPath> {
        self.fields.iter().map(|field| &field.path)
    }

    /// Whether any path expands one row into several entries.
    #[must_use]
    pub const fn is_multi_key(&self) -> bool {
        self.container.is_some()
    }

    /// Descriptors for decoding this index's key tuples, in component order.
    #[must_use]
    pub fn key_descriptors(&self) -> Vec<&TypeDescriptor> {
        self.fields
            .iter()
            .map(|field| &field.key_descriptor)
            .collect()
    }

    pub(crate) fn fields(&self) -> &[PlanField] {
        &self.fields
    }

    pub(crate) fn container(&self) -> Option<&[PathStep]> {
        self.container.as_deref()
    }

    /// Whether the container expands array elements rather than map entries.
    pub(crate) fn expands_elements(&self) -> bool {
        self.container_step == Some(PathStep::Elements)
    }
}

fn declared_descriptor(declared: JsonIndexType) -> TypeDescriptor {
    match declared {
        JsonIndexType::Long => TypeDescriptor::long(),
        JsonIndexType::Double => TypeDescriptor::double(),
        JsonIndexType::Number => TypeDescriptor::number(),
        JsonIndexType::String => TypeDescriptor::string(),
        JsonIndexType::Boolean => TypeDescriptor::boolean(),
    }
}
