//! Property-based tests for arbor-storage using proptest.

use arbor_core::schema::{DbSchema, IndexSchema, TableSchema};
use arbor_core::{DataType, Value};
use arbor_index::FieldIndex;
use arbor_storage::Store;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
struct Row {
    id: i64,
    age: i64,
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i64, i64),
    Delete(i64),
    Commit,
    Abort,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-10i64..10, 0i64..4).prop_map(|(id, age)| Op::Insert(id, age)),
        2 => (-10i64..10).prop_map(Op::Delete),
        1 => Just(Op::Commit),
        1 => Just(Op::Abort),
    ]
}

fn store() -> Store<Row> {
    let schema = DbSchema::new().table(
        TableSchema::builder("row")
            .index(IndexSchema::single(
                "id",
                FieldIndex::new("id", DataType::Int64, |r: &Row| Some(Value::from(r.id))),
            ))
            .index(IndexSchema::single(
                "age",
                FieldIndex::new("age", DataType::Int64, |r: &Row| Some(Value::from(r.age))),
            ))
            .build(),
    );
    Store::init(schema).unwrap()
}

proptest! {
    /// Test that every index agrees with a model after any mix of writes,
    /// commits and aborts.
    #[test]
    fn store_matches_model(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let store = store();
        let mut committed: BTreeMap<i64, i64> = BTreeMap::new();
        let mut pending = committed.clone();
        let mut txn = store.txn();

        for op in ops {
            match op {
                Op::Insert(id, age) => {
                    txn.insert("row", Row { id, age }).unwrap();
                    pending.insert(id, age);
                }
                Op::Delete(id) => {
                    let deleted = txn.delete("row", &Row { id, age: 0 }).is_ok();
                    prop_assert_eq!(deleted, pending.remove(&id).is_some());
                }
                Op::Commit => {
                    txn.commit();
                    committed = pending.clone();
                    txn = store.txn();
                }
                Op::Abort => {
                    txn.abort();
                    pending = committed.clone();
                    txn = store.txn();
                }
            }
        }

        let by_id: Vec<(i64, i64)> = txn
            .get("row", "id", &[])
            .unwrap()
            .map(|r| (r.id, r.age))
            .collect();
        let expected: Vec<(i64, i64)> = pending.iter().map(|(&id, &age)| (id, age)).collect();
        prop_assert_eq!(by_id, expected);

        for age in 0..4i64 {
            let ids: Vec<i64> = txn
                .get("row", "age", &[age.into()])
                .unwrap()
                .map(|r| r.id)
                .collect();
            let expected: Vec<i64> = pending
                .iter()
                .filter(|(_, a)| **a == age)
                .map(|(&id, _)| id)
                .collect();
            prop_assert_eq!(ids, expected);
        }

        // The store root only holds what was committed.
        let published: Vec<i64> = store
            .txn()
            .get("row", "id", &[])
            .unwrap()
            .map(|r| r.id)
            .collect();
        prop_assert_eq!(published, committed.keys().copied().collect::<Vec<_>>());
    }
}
