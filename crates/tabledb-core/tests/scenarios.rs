//! End-to-end scenarios over the public API: descriptors, rows, typed JSON
//! indexes, multi-key completeness, and the in-memory table.

use std::{cmp::Ordering, sync::Arc};
use tabledb_core::{
    config::IndexLimits,
    db::Table,
    error::ErrorClass,
    index::IndexPlan,
    key::KeyTuple,
    prelude::*,
    value::{compare, compare_key_values},
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn table(fields: Vec<(&str, TypeDescriptor)>, indexes: Vec<IndexModel>) -> Arc<TableModel> {
    let mut all = vec![("id", TypeDescriptor::long())];
    all.extend(fields);

    Arc::new(TableModel::new("t", all, vec!["id"], indexes).expect("table definition"))
}

fn row_with_json(model: &Arc<TableModel>, id: i64, field: &str, json: &str) -> Row {
    let mut row = Row::new(Arc::clone(model));
    row.put("id", id).expect("id");
    row.put_json(field, json).expect("json field");
    row
}

#[test]
fn defaults_fill_unset_fields_and_null_stays_null() {
    let score = TypeDescriptor::integer()
        .nullable(true)
        .with_default(Value::Integer(-1000))
        .expect("default fits");
    let model = table(vec![("score", score)], vec![]);

    let mut row = Row::new(Arc::clone(&model));
    row.put("id", 1i64).expect("id");
    assert!(row.get("score").is_absent());

    row.apply_defaults().expect("defaults");
    assert_eq!(row.get("score"), &Value::Integer(-1000));

    row.put_null("score").expect("nullable");
    assert!(row.is_null("score"));
    row.apply_defaults().expect("defaults");
    assert!(row.is_null("score"), "explicit null is not replaced by the default");

    let strict = table(vec![("n", TypeDescriptor::integer())], vec![]);
    let mut row = Row::new(strict);
    let err = row.put_null("n").expect_err("not nullable");
    assert_eq!(err.class, ErrorClass::Validation);
}

#[test]
fn fixed_binary_requires_exact_length_and_round_trips_as_text() {
    let descriptor = TypeDescriptor::fixed_binary(7);

    let err = descriptor
        .create_value(Value::Binary(vec![0; 8]))
        .expect_err("eight bytes");
    assert!(err.is_validation());

    let value = descriptor
        .create_value(Value::Binary(vec![1, 2, 3, 4, 5, 6, 7]))
        .expect("seven bytes");
    assert_eq!(value, Value::FixedBinary(vec![1, 2, 3, 4, 5, 6, 7]));

    let text = value.to_string();
    assert_eq!(descriptor.value_from_string(&text).expect("parse"), value);
}

#[test]
fn typed_json_index_rejects_values_of_the_wrong_shape() {
    init_tracing();
    let index = IndexModel::new("by_age", vec![IndexField::typed("doc.age", JsonIndexType::Long)]);
    let model = table(
        vec![("doc", TypeDescriptor::json().nullable(true))],
        vec![index],
    );
    let plan = IndexPlan::new(&model, &model.indexes()[0], &IndexLimits::default())
        .expect("index definition");

    let err = plan
        .derive(&row_with_json(&model, 1, "doc", r#"{"age": 1.5}"#))
        .expect_err("1.5 is not a long");
    assert_eq!(err.class, ErrorClass::IndexConstraint);

    let keys = plan
        .derive(&row_with_json(&model, 2, "doc", r#"{"age": 30}"#))
        .expect("30 is a long");
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0][0], Value::Long(30));
    assert_eq!(keys[0][0].kind(), Some(FieldKind::Long));

    // The same rules guard the table's write path.
    let mut table = Table::new(Arc::clone(&model)).expect("table");
    assert!(
        table
            .put(row_with_json(&model, 1, "doc", r#"{"age": 1.5}"#))
            .is_err()
    );
    assert!(table.is_empty());
    table
        .put(row_with_json(&model, 2, "doc", r#"{"age": 30}"#))
        .expect("put");
    assert_eq!(table.index_entry_count("by_age").expect("index"), 1);
}

#[test]
fn multi_key_rows_never_contribute_zero_tuples() {
    init_tracing();
    let index = IndexModel::new(
        "by_value",
        vec![IndexField::typed("m.values()", JsonIndexType::Long)],
    );
    let model = table(
        vec![(
            "m",
            TypeDescriptor::map(TypeDescriptor::json()).nullable(true),
        )],
        vec![index],
    );
    let plan = IndexPlan::new(&model, &model.indexes()[0], &IndexLimits::default())
        .expect("index definition");

    let empty = plan.derive(&row_with_json(&model, 1, "m", "{}")).expect("empty map");
    assert_eq!(empty, vec![KeyTuple::new(vec![Value::Empty])]);

    let json_null = plan
        .derive(&row_with_json(&model, 2, "m", r#"{"a": null}"#))
        .expect("json null entry");
    assert_eq!(json_null, vec![KeyTuple::new(vec![Value::JsonNull])]);

    let three = plan
        .derive(&row_with_json(&model, 3, "m", r#"{"a": 1, "b": 2, "c": 3}"#))
        .expect("three entries");
    assert!(!three.is_empty());
    assert_eq!(three.len(), 3);

    let sql_null = plan.derive(&row_with_json(&model, 4, "m", "null")).expect("sql null");
    assert_eq!(sql_null, vec![KeyTuple::new(vec![Value::Null])]);

    // Every row is findable through its marker.
    let mut table = Table::new(Arc::clone(&model)).expect("table");
    for (id, json) in [(1, "{}"), (2, r#"{"a": null}"#), (3, r#"{"a": 1, "b": 2, "c": 3}"#)] {
        table.put(row_with_json(&model, id, "m", json)).expect("put");
    }
    assert_eq!(table.index_entry_count("by_value").expect("index"), 5);
    let marked = table
        .scan_index("by_value", &KeyTuple::new(vec![Value::Empty]))
        .expect("scan");
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].1.get("id"), &Value::Long(1));
}

#[test]
fn json_null_documents_expand_to_one_marker() {
    let index = IndexModel::new(
        "by_value",
        vec![IndexField::typed("doc.m.values()", JsonIndexType::Long)],
    );
    let model = table(vec![("doc", TypeDescriptor::json().nullable(true))], vec![index]);
    let plan = IndexPlan::new(&model, &model.indexes()[0], &IndexLimits::default())
        .expect("index definition");

    for json in ["null", r#"{"m": null}"#] {
        let keys = plan.derive(&row_with_json(&model, 1, "doc", json)).expect(json);
        assert_eq!(keys, vec![KeyTuple::new(vec![Value::JsonNull])], "{json}");
    }
}

#[test]
fn index_definitions_are_rejected_at_creation() {
    let model = table(
        vec![
            ("doc", TypeDescriptor::json().nullable(true)),
            ("blob", TypeDescriptor::binary().nullable(true)),
        ],
        vec![],
    );
    let mut table = Table::new(model).expect("table");

    for index in [
        IndexModel::new("untyped", vec![IndexField::new("doc.age")]),
        IndexModel::new("blob", vec![IndexField::new("blob")]),
        IndexModel::new("unknown", vec![IndexField::new("nope")]),
    ] {
        let name = index.name.clone();
        let err = table.create_index(index).expect_err(&name);
        assert!(err.is_definition(), "{name}: {err}");
    }
    assert!(table.model().indexes().is_empty());
}

#[test]
fn numeric_kinds_are_equivalent_across_the_public_api() {
    let number = Value::number("99").expect("literal");

    assert!(Value::Integer(99).loosely_equals(&number));
    assert_eq!(
        compare_key_values(&Value::Long(99), &Value::from(99.0f32)),
        Ordering::Equal
    );
    assert!(
        compare(&Value::Long(99), &Value::Boolean(true))
            .expect_err("long vs boolean")
            .is_type_mismatch()
    );
}

#[test]
fn limits_load_from_configuration() {
    let limits = IndexLimits::from_json(r#"{"max_keys_per_row": 2}"#).expect("limits");
    let index = IndexModel::new("by_tag", vec![IndexField::new("tags[]")]);
    let model = table(
        vec![(
            "tags",
            TypeDescriptor::array(TypeDescriptor::string()).nullable(true),
        )],
        vec![index],
    );
    let mut table = Table::with_limits(Arc::clone(&model), limits).expect("table");

    let mut row = table.new_row();
    row.put("id", 1i64).expect("id");
    row.put("tags", Value::from_list(vec!["a", "b", "c"])).expect("tags");

    let err = table.put(row).expect_err("three keys exceed the limit");
    assert!(err.is_index_constraint());
    assert!(table.is_empty());
}

#[test]
fn shared_models_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Value>();
    assert_send_sync::<TypeDescriptor>();
    assert_send_sync::<TableModel>();
    assert_send_sync::<IndexPlan>();
    assert_send_sync::<Row>();

    let model = table(vec![("name", TypeDescriptor::string())], vec![]);
    let handle = std::thread::spawn(move || model.field("name").map(TypeDescriptor::kind));
    assert_eq!(handle.join().expect("thread"), Some(FieldKind::String));
}
