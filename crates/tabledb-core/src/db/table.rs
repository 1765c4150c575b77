use crate::{
    config::IndexLimits,
    error::{CoreError, ErrorOrigin},
    index::{IndexKey, IndexPlan},
    key::KeyTuple,
    model::{IndexModel, TableModel, TypeDescriptor},
    row::Row,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, trace};

///
/// IndexStore
/// One index: its plan plus `index-key bytes → primary-key bytes`.
///

#[derive(Debug)]
struct IndexStore {
    plan: IndexPlan,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

///
/// Table
///
/// Rows by encoded primary key plus one ordered entry map per index.
/// Every mutation derives everything it needs first and only then writes,
/// so a rejected put or index creation leaves the table untouched.
///

#[derive(Debug)]
pub struct Table {
    model: Arc<TableModel>,
    limits: IndexLimits,
    rows: BTreeMap<Vec<u8>, Row>,
    indexes: Vec<IndexStore>,
}

impl Table {
    pub fn new(model: Arc<TableModel>) -> Result<Self, CoreError> {
        Self::with_limits(model, IndexLimits::default())
    }

    pub fn with_limits(model: Arc<TableModel>, limits: IndexLimits) -> Result<Self, CoreError> {
        let indexes = model
            .indexes()
            .iter()
            .map(|index| {
                Ok(IndexStore {
                    plan: IndexPlan::new(&model, index, &limits)?,
                    entries: BTreeMap::new(),
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(Self {
            model,
            limits,
            rows: BTreeMap::new(),
            indexes,
        })
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<TableModel> {
        &self.model
    }

    /// Empty row bound to this table's model.
    #[must_use]
    pub fn new_row(&self) -> Row {
        Row::new(Arc::clone(&self.model))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert or replace a row.
    ///
    /// Unset fields take their defaults, then every index key is derived.
    /// Any failure rejects the write with nothing changed.
    pub fn put(&mut self, mut row: Row) -> Result<(), CoreError> {
        if row.table().fields() != self.model.fields()
            || row.table().primary_key() != self.model.primary_key()
        {
            return Err(CoreError::validation(
                ErrorOrigin::Table,
                format!("row does not belong to table '{}'", self.model.name()),
            ));
        }

        let (entries, pk) = match self.prepare(&mut row) {
            Ok(prepared) => prepared,
            Err(err) => {
                debug!(table = %self.model.name(), error = %err.display_with_class(), "rejected write");
                return Err(err);
            }
        };

        if let Some(old) = self.rows.get(&pk) {
            let stale = self.derive_entries(old, &pk)?;
            for (store, keys) in self.indexes.iter_mut().zip(stale) {
                for key in keys {
                    store.entries.remove(&key);
                }
            }
        }

        for (store, keys) in self.indexes.iter_mut().zip(entries) {
            for key in keys {
                store.entries.insert(key, pk.clone());
            }
        }
        self.rows.insert(pk, row);
        trace!(table = %self.model.name(), rows = self.rows.len(), "put row");

        Ok(())
    }

    /// Row by primary key.
    pub fn get(&self, primary_key: &KeyTuple) -> Result<Option<&Row>, CoreError> {
        Ok(self.rows.get(&primary_key.encode()?))
    }

    /// Remove a row and its index entries; returns the removed row.
    pub fn delete(&mut self, primary_key: &KeyTuple) -> Result<Option<Row>, CoreError> {
        let pk = primary_key.encode()?;
        let Some(row) = self.rows.get(&pk) else {
            return Ok(None);
        };

        let stale = self.derive_entries(row, &pk)?;
        for (store, keys) in self.indexes.iter_mut().zip(stale) {
            for key in keys {
                store.entries.remove(&key);
            }
        }
        let removed = self.rows.remove(&pk);
        trace!(table = %self.model.name(), rows = self.rows.len(), "deleted row");

        Ok(removed)
    }

    /// Index entries whose leading components equal `prefix`, in key order,
    /// each with its decoded key tuple and row. An empty prefix scans the
    /// whole index.
    pub fn scan_index(
        &self,
        name: &str,
        prefix: &KeyTuple,
    ) -> Result<Vec<(KeyTuple, &Row)>, CoreError> {
        let store = self.store(name)?;
        let descriptors = store.plan.key_descriptors();
        let pk_descriptors = self.primary_key_descriptors()?;
        let start = prefix.encode()?;

        let mut out = Vec::new();
        for (key, pk) in store.entries.range(start.clone()..) {
            if !key.starts_with(&start) {
                break;
            }
            let decoded = IndexKey::from_bytes(key, &descriptors, &pk_descriptors)?;
            let row = self.rows.get(pk).ok_or_else(|| {
                CoreError::decode_corruption(format!(
                    "index '{name}' references a missing row"
                ))
            })?;
            out.push((decoded.tuple().clone(), row));
        }

        Ok(out)
    }

    pub fn index_entry_count(&self, name: &str) -> Result<usize, CoreError> {
        Ok(self.store(name)?.entries.len())
    }

    /// Define a new index and populate it from the existing rows.
    ///
    /// The definition is validated against the schema and every existing
    /// row must produce valid keys; otherwise the index is not created.
    pub fn create_index(&mut self, index: IndexModel) -> Result<(), CoreError> {
        let name = index.name.clone();
        let mut model = (*self.model).clone();

        let built = model.add_index(index, &self.limits).and_then(|plan| {
            let mut entries = BTreeMap::new();
            for (pk, row) in &self.rows {
                for (key, _) in plan.derive_encoded(row)? {
                    let mut bytes = key;
                    bytes.extend_from_slice(pk);
                    entries.insert(bytes, pk.clone());
                }
            }
            Ok(IndexStore { plan, entries })
        });

        let store = match built {
            Ok(store) => store,
            Err(err) => {
                debug!(table = %self.model.name(), index = %name, error = %err.display_with_class(), "rejected index creation");
                return Err(err);
            }
        };

        debug!(table = %self.model.name(), index = %name, entries = store.entries.len(), "created index");
        self.indexes.push(store);
        self.model = Arc::new(model);

        Ok(())
    }

    // Defaults, primary-key bytes, and every index entry for a pending row.
    fn prepare(&self, row: &mut Row) -> Result<(Vec<Vec<Vec<u8>>>, Vec<u8>), CoreError> {
        row.apply_defaults()?;
        let pk = row.primary_key()?.encode()?;
        let entries = self.derive_entries(row, &pk)?;

        Ok((entries, pk))
    }

    // Physical entry keys per index for one row, in index order.
    fn derive_entries(&self, row: &Row, pk: &[u8]) -> Result<Vec<Vec<Vec<u8>>>, CoreError> {
        self.indexes
            .iter()
            .map(|store| {
                Ok(store
                    .plan
                    .derive_encoded(row)?
                    .into_keys()
                    .map(|mut key| {
                        key.extend_from_slice(pk);
                        key
                    })
                    .collect())
            })
            .collect()
    }

    fn store(&self, name: &str) -> Result<&IndexStore, CoreError> {
        self.indexes
            .iter()
            .find(|store| store.plan.name() == name)
            .ok_or_else(|| {
                CoreError::table_not_found(format!(
                    "table '{}' has no index '{name}'",
                    self.model.name()
                ))
            })
    }

    fn primary_key_descriptors(&self) -> Result<Vec<&TypeDescriptor>, CoreError> {
        self.model
            .primary_key()
            .iter()
            .map(|name| {
                self.model.field(name).ok_or_else(|| {
                    CoreError::table_not_found(format!("primary-key field '{name}' is missing"))
                })
            })
            .collect()
    }
}
