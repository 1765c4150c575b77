use crate::{
    db::Table,
    error::ErrorClass,
    key::KeyTuple,
    model::{IndexField, IndexModel, JsonIndexType, TableModel, TypeDescriptor},
    row::Row,
    value::Value,
};
use std::sync::Arc;

fn model() -> Arc<TableModel> {
    Arc::new(
        TableModel::new(
            "people",
            vec![
                ("id", TypeDescriptor::long()),
                ("name", TypeDescriptor::string().nullable(true)),
                (
                    "tags",
                    TypeDescriptor::array(TypeDescriptor::string()).nullable(true),
                ),
                ("doc", TypeDescriptor::json().nullable(true)),
            ],
            vec!["id"],
            vec![
                IndexModel::new("by_name", vec![IndexField::new("name")]),
                IndexModel::new("by_tag", vec![IndexField::new("tags[]")]),
            ],
        )
        .expect("table definition"),
    )
}

fn person(table: &Table, id: i64, name: &str, tags: &[&str]) -> Row {
    let mut row = table.new_row();
    row.put("id", id).expect("id");
    row.put("name", name).expect("name");
    row.put("tags", Value::from_list(tags.to_vec())).expect("tags");
    row
}

fn pk(id: i64) -> KeyTuple {
    KeyTuple::new(vec![Value::Long(id)])
}

fn names(rows: &[(KeyTuple, &Row)]) -> Vec<String> {
    rows.iter().map(|(_, row)| row.get("name").to_string()).collect()
}

#[test]
fn put_indexes_rows_and_get_reads_them_back() {
    let mut table = Table::new(model()).expect("table");
    table.put(person(&table, 1, "ada", &["x", "y"])).expect("put");
    table.put(person(&table, 2, "bob", &[])).expect("put");

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get(&pk(1)).expect("get").map(|row| row.get("name").clone()),
        Some(Value::from("ada"))
    );
    assert_eq!(table.get(&pk(3)).expect("get"), None);

    assert_eq!(table.index_entry_count("by_name").expect("index"), 2);
    // Two tags for ada, one EMPTY marker for bob.
    assert_eq!(table.index_entry_count("by_tag").expect("index"), 3);
}

#[test]
fn replacing_a_row_drops_its_stale_entries() {
    let mut table = Table::new(model()).expect("table");
    table.put(person(&table, 1, "ada", &["x", "y"])).expect("put");
    table.put(person(&table, 1, "ada", &["z"])).expect("replace");

    assert_eq!(table.len(), 1);
    assert_eq!(table.index_entry_count("by_tag").expect("index"), 1);
    assert!(
        table
            .scan_index("by_tag", &KeyTuple::new(vec![Value::from("x")]))
            .expect("scan")
            .is_empty()
    );
}

#[test]
fn scans_return_rows_in_index_order() {
    let mut table = Table::new(model()).expect("table");
    table.put(person(&table, 1, "carol", &["b"])).expect("put");
    table.put(person(&table, 2, "ada", &["a", "b"])).expect("put");
    table.put(person(&table, 3, "bob", &["a"])).expect("put");

    let all = table.scan_index("by_name", &KeyTuple::new(vec![])).expect("scan");
    assert_eq!(names(&all), vec!["ada", "bob", "carol"]);

    let tagged = table
        .scan_index("by_tag", &KeyTuple::new(vec![Value::from("a")]))
        .expect("scan");
    // Equal index values order by primary key.
    assert_eq!(names(&tagged), vec!["ada", "bob"]);
    assert_eq!(tagged[0].0, KeyTuple::new(vec![Value::from("a")]));

    let err = table.scan_index("missing", &KeyTuple::new(vec![])).expect_err("no index");
    assert_eq!(err.class, ErrorClass::NotFound);
}

#[test]
fn rejected_puts_leave_the_table_unchanged() {
    let mut table = Table::new(model()).expect("table");
    table
        .create_index(IndexModel::new(
            "by_age",
            vec![IndexField::typed("doc.age", JsonIndexType::Long)],
        ))
        .expect("create index");

    let mut row = person(&table, 1, "ada", &["x"]);
    row.put_json("doc", r#"{"age": 30}"#).expect("doc");
    table.put(row).expect("put");

    let mut bad = person(&table, 1, "ada", &["y"]);
    bad.put_json("doc", r#"{"age": 1.5}"#).expect("doc");
    let err = table.put(bad).expect_err("age is not a long");
    assert!(err.is_index_constraint());

    let stored = table.get(&pk(1)).expect("get").expect("row kept");
    assert_eq!(stored.get("tags"), &Value::from_list(vec!["x"]));
    assert_eq!(table.index_entry_count("by_tag").expect("index"), 1);
    assert_eq!(
        table
            .scan_index("by_tag", &KeyTuple::new(vec![Value::from("x")]))
            .expect("scan")
            .len(),
        1
    );

    let mut missing_key = table.new_row();
    missing_key.put("name", "nobody").expect("name");
    assert!(table.put(missing_key).expect_err("no primary key").is_validation());
    assert_eq!(table.len(), 1);
}

#[test]
fn delete_removes_row_and_entries() {
    let mut table = Table::new(model()).expect("table");
    table.put(person(&table, 1, "ada", &["x", "y"])).expect("put");

    let removed = table.delete(&pk(1)).expect("delete").expect("row existed");
    assert_eq!(removed.get("name"), &Value::from("ada"));
    assert!(table.is_empty());
    assert_eq!(table.index_entry_count("by_tag").expect("index"), 0);
    assert_eq!(table.index_entry_count("by_name").expect("index"), 0);
    assert_eq!(table.delete(&pk(1)).expect("delete"), None);
}

#[test]
fn create_index_backfills_existing_rows() {
    let mut table = Table::new(model()).expect("table");
    for (id, age) in [(1, "30"), (2, "41"), (3, "null")] {
        let mut row = person(&table, id, "p", &[]);
        row.put_json("doc", &format!(r#"{{"age": {age}}}"#)).expect("doc");
        table.put(row).expect("put");
    }

    table
        .create_index(IndexModel::new(
            "by_age",
            vec![IndexField::typed("doc.age", JsonIndexType::Long)],
        ))
        .expect("create index");

    assert_eq!(table.index_entry_count("by_age").expect("index"), 3);
    assert!(table.model().index("by_age").is_some());

    let nulls = table
        .scan_index("by_age", &KeyTuple::new(vec![Value::JsonNull]))
        .expect("scan");
    assert_eq!(nulls.len(), 1);
    assert_eq!(nulls[0].1.get("id"), &Value::Long(3));
}

#[test]
fn create_index_rejects_rows_that_cannot_be_indexed() {
    let mut table = Table::new(model()).expect("table");
    let mut row = person(&table, 1, "ada", &[]);
    row.put_json("doc", r#"{"age": "thirty"}"#).expect("doc");
    table.put(row).expect("put");

    let err = table
        .create_index(IndexModel::new(
            "by_age",
            vec![IndexField::typed("doc.age", JsonIndexType::Long)],
        ))
        .expect_err("existing row is not a long");
    assert!(err.is_index_constraint());
    assert!(table.model().index("by_age").is_none());
    assert!(table.index_entry_count("by_age").is_err());

    let duplicate = table
        .create_index(IndexModel::new("by_name", vec![IndexField::new("name")]))
        .expect_err("name taken");
    assert!(duplicate.is_definition());
}

#[test]
fn rows_from_other_tables_are_rejected() {
    let mut table = Table::new(model()).expect("table");
    let other = Arc::new(
        TableModel::new("other", vec![("id", TypeDescriptor::long())], vec!["id"], vec![])
            .expect("table definition"),
    );
    let mut row = Row::new(other);
    row.put("id", 1i64).expect("id");

    assert!(table.put(row).expect_err("foreign row").is_validation());
}
