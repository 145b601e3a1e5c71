// localStorage実装のブラウザテスト
// wasm-pack test --headless --chrome core で実行する。
#![cfg(target_arch = "wasm32")]

use std::sync::Arc;

use feedlite_core::config::StorageKeys;
use feedlite_core::storage::local::LocalStorage;
use feedlite_core::storage::Storage;
use feedlite_core::store::Store;
use feedlite_core::types::User;
use web_sys::{StorageEvent, StorageEventInit};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn test_keys(prefix: &str) -> StorageKeys {
    StorageKeys {
        users: format!("{}_users", prefix),
        posts: format!("{}_posts", prefix),
        messages: format!("{}_messages", prefix),
        session: format!("{}_session", prefix),
    }
}

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let storage = LocalStorage::open().unwrap();
    storage.set_item("feedlite_test_key", "value").unwrap();
    assert_eq!(storage.get_item("feedlite_test_key").unwrap(), Some("value".to_string()));

    storage.remove_item("feedlite_test_key").unwrap();
    assert_eq!(storage.get_item("feedlite_test_key").unwrap(), None);
}

#[wasm_bindgen_test]
fn test_own_writes_are_not_notified() {
    let storage = LocalStorage::open().unwrap();
    let mut sub = storage.watch().unwrap();

    storage.set_item("feedlite_test_watch", "1").unwrap();
    storage.remove_item("feedlite_test_watch").unwrap();

    assert!(sub.drain().is_empty());
}

/// 他タブからの書き込み相当のイベントをwindowに送る
fn dispatch_storage_event(key: &str, new_value: &str) {
    let init = StorageEventInit::new();
    init.set_key(Some(key));
    init.set_new_value(Some(new_value));
    let event = StorageEvent::new_with_event_init_dict("storage", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn test_storage_event_delivery_and_release() {
    let storage = LocalStorage::open().unwrap();
    let mut first = storage.watch().unwrap();
    let mut second = storage.watch().unwrap();

    dispatch_storage_event("k", "v");

    let events = first.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key.as_deref(), Some("k"));
    assert_eq!(events[0].new_value.as_deref(), Some("v"));
    assert_eq!(second.drain().len(), 1);

    // 解除済みのリスナーが残っていれば破棄済みClosureの呼び出しで例外になる
    drop(first);
    dispatch_storage_event("k", "w");

    let events = second.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].new_value.as_deref(), Some("w"));
}

#[wasm_bindgen_test]
fn test_store_session_on_local_storage() {
    let store = Store::new(Arc::new(LocalStorage::open().unwrap()), test_keys("feedlite_test"));
    store.clear_session();
    assert_eq!(store.load_session(), None);

    let user = User {
        id: "1".to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@example.com".to_string(),
        avatar: String::new(),
    };
    store.save_session(&user);
    assert_eq!(store.load_session(), Some(user));

    store.clear_session();
    assert_eq!(store.load_session(), None);
}
