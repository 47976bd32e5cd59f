//! Store Tests
//!
//! Tests verify:
//! - String and hash bindings with type tags
//! - get_or_create_hash creation, reuse, and type rejection
//! - Rollback of a hash created by a failing call
//! - Concurrent read-modify-write without lost updates

use std::sync::Arc;
use std::thread;

use hashkv::{CommandError, Store, Value, ValueType};

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let store = Store::new(4);
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.shard_count(), 4);
    assert_eq!(store.get("missing"), None);
}

#[test]
fn test_zero_shards_clamped_to_one() {
    let store = Store::new(0);
    assert_eq!(store.shard_count(), 1);

    store.set_string("k", "v");
    assert!(store.exists("k"));
}

#[test]
fn test_set_string_and_get() {
    let store = Store::default();

    store.set_string("key", "value");

    assert_eq!(store.get("key"), Some(Value::Str("value".to_string())));
    assert_eq!(store.value_type("key"), Some(ValueType::String));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_set_string_replaces_hash() {
    let store = Store::default();
    store
        .get_or_create_hash("key", |hash, _| Ok(hash.set_field("f", "1")))
        .unwrap();

    store.set_string("key", "plain");

    assert_eq!(store.value_type("key"), Some(ValueType::String));
}

#[test]
fn test_delete() {
    let store = Store::default();
    store.set_string("key", "value");

    assert!(store.delete("key"));
    assert!(!store.exists("key"));
    assert!(!store.delete("key"));
    assert!(store.is_empty());
}

// =============================================================================
// Hash Resolution Tests
// =============================================================================

#[test]
fn test_get_or_create_hash_creates_once() {
    let store = Store::default();

    let created_first = store
        .get_or_create_hash("h", |hash, created| {
            hash.set_field("f", "v");
            Ok(created)
        })
        .unwrap();
    let created_second = store.get_or_create_hash("h", |_, created| Ok(created)).unwrap();

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(store.value_type("h"), Some(ValueType::Hash));
    assert_eq!(store.get_field("h", "f"), Ok(Some("v".to_string())));
}

#[test]
fn test_get_or_create_hash_rejects_string_key() {
    let store = Store::default();
    store.set_string("key", "value");

    let mut called = false;
    let result = store.get_or_create_hash("key", |_, _| {
        called = true;
        Ok(())
    });

    assert_eq!(result, Err(CommandError::WrongType));
    assert!(!called);
    assert_eq!(store.get("key"), Some(Value::Str("value".to_string())));
}

#[test]
fn test_failed_call_on_new_hash_leaves_no_binding() {
    let store = Store::default();

    let result: Result<(), _> =
        store.get_or_create_hash("fresh", |_, _| Err(CommandError::NotAnInteger));

    assert_eq!(result, Err(CommandError::NotAnInteger));
    assert!(!store.exists("fresh"));
}

#[test]
fn test_failed_call_on_existing_hash_keeps_binding() {
    let store = Store::default();
    store
        .get_or_create_hash("h", |hash, _| Ok(hash.set_field("f", "abc")))
        .unwrap();

    let result = store.get_or_create_hash("h", |hash, _| hash.increment_field("f", 1));

    assert_eq!(result, Err(CommandError::NotAnInteger));
    assert_eq!(store.get_field("h", "f"), Ok(Some("abc".to_string())));
}

#[test]
fn test_get_field() {
    let store = Store::default();
    store.set_string("s", "v");
    store
        .get_or_create_hash("h", |hash, _| Ok(hash.set_field("f", "1")))
        .unwrap();

    assert_eq!(store.get_field("missing", "f"), Ok(None));
    assert_eq!(store.get_field("h", "other"), Ok(None));
    assert_eq!(store.get_field("h", "f"), Ok(Some("1".to_string())));
    assert_eq!(store.get_field("s", "f"), Err(CommandError::WrongType));
}

#[test]
fn test_keys_spread_across_shards() {
    let store = Store::new(8);

    for i in 0..200 {
        store.set_string(format!("key{}", i), "v");
    }

    assert_eq!(store.len(), 200);
    for i in 0..200 {
        assert!(store.exists(&format!("key{}", i)));
    }
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_increments_same_field() {
    let store = Arc::new(Store::new(4));
    let threads = 8;
    let per_thread = 1000;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..per_thread {
                    store
                        .get_or_create_hash("counter", |hash, _| hash.increment_field("hits", 1))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (threads * per_thread).to_string();
    assert_eq!(store.get_field("counter", "hits"), Ok(Some(expected)));
}

#[test]
fn test_concurrent_first_touch_creates_single_hash() {
    let store = Arc::new(Store::new(2));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .get_or_create_hash("shared", |hash, created| {
                        hash.set_field(format!("f{}", i), "1");
                        Ok(created)
                    })
                    .unwrap()
            })
        })
        .collect();

    let creators = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|created| *created)
        .count();

    assert_eq!(creators, 1);
    match store.get("shared") {
        Some(Value::Hash(hash)) => assert_eq!(hash.len(), 16),
        other => panic!("Expected hash, got {:?}", other),
    }
}
