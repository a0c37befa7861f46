//! Behavioural tests for `InMemoryRecordStore` through the `RecordStore` trait.

use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use userbase_core::{Item, PRIMARY_KEY};
use userbase_repository::{InMemoryRecordStore, RecordStore};

fn user_item(email: &str, first_name: &str) -> Item {
    match json!({ "email": email, "first_name": first_name, "last_name": "" }) {
        Value::Object(item) => item,
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn test_scan_reflects_puts_and_deletes() {
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());

    store.put(user_item("a@x.io", "A")).await.unwrap();
    store.put(user_item("b@x.io", "B")).await.unwrap();
    store.put(user_item("c@x.io", "C")).await.unwrap();
    store.delete("b@x.io").await.unwrap();

    let emails: HashSet<String> = store
        .scan_all()
        .await
        .unwrap()
        .iter()
        .filter_map(|item| item.get(PRIMARY_KEY).and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    assert_eq!(
        emails,
        HashSet::from(["a@x.io".to_string(), "c@x.io".to_string()])
    );
}

#[tokio::test]
async fn test_concurrent_puts_are_all_visible() {
    let store = Arc::new(InMemoryRecordStore::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .put(user_item(&format!("user{i}@x.io"), "N"))
                    .await
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len().await, 32);
    assert_eq!(store.scan_all().await.unwrap().len(), 32);
}
