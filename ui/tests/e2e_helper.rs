// E2Eテスト用のヘルパー
// eGuiはcanvasベースなので、通常のDOM操作ではテストできない
// 代わりに、localStorageに保存された状態をJavaScript経由で確認する
#![cfg(target_arch = "wasm32")]

use std::sync::Arc;

use feedlite_core::config::CoreConfig;
use feedlite_core::storage::local::LocalStorage;
use feedlite_core::store::Store;
use feedlite_core::types::{SignUpForm, User};
use feedlite_core::CoreHandle;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// 保存状態を確認するヘルパー
#[wasm_bindgen]
pub struct TestHelper;

#[wasm_bindgen]
impl TestHelper {
    /// localStorageが使えるかチェック
    pub fn is_storage_available() -> bool {
        LocalStorage::open().is_ok()
    }

    /// 保存済みのメッセージ数
    pub fn stored_message_count() -> usize {
        Self::store().map(|s| s.get_messages().len()).unwrap_or(0)
    }

    /// 保存済みのユーザー数
    pub fn stored_user_count() -> usize {
        Self::store().map(|s| s.get_users().len()).unwrap_or(0)
    }

    /// セッションのユーザーID
    pub fn session_user_id() -> Option<String> {
        Self::store().and_then(|s| s.load_session()).map(|u| u.id)
    }

    fn store() -> Option<Store> {
        let storage = LocalStorage::open().ok()?;
        let config = CoreConfig::load(&storage);
        Some(Store::new(Arc::new(storage), config.keys))
    }
}

fn mount() -> CoreHandle {
    let storage = LocalStorage::open().unwrap();
    CoreHandle::mount(Arc::new(storage), &CoreConfig::default()).unwrap()
}

#[wasm_bindgen_test]
fn test_storage_available() {
    assert!(TestHelper::is_storage_available(), "localStorage should be available");
}

#[wasm_bindgen_test]
fn test_sign_up_persists_session() {
    let mut core = mount();
    let email = format!("e2e-{}@example.com", feedlite_core::clock::next_id());
    let user = core
        .sign_up(SignUpForm {
            first_name: "E2E".to_string(),
            last_name: "Tester".to_string(),
            email,
            avatar: String::new(),
        })
        .unwrap();

    assert_eq!(TestHelper::session_user_id(), Some(user.id.clone()));
    assert!(TestHelper::stored_user_count() >= 1);

    core.log_out();
    assert_eq!(TestHelper::session_user_id(), None);
}

#[wasm_bindgen_test]
fn test_own_message_is_not_echoed() {
    let mut core = mount();
    let email = format!("e2e-{}@example.com", feedlite_core::clock::next_id());
    core.sign_up(SignUpForm {
        first_name: "Echo".to_string(),
        last_name: "Tester".to_string(),
        email,
        avatar: String::new(),
    })
    .unwrap();

    let before = TestHelper::stored_message_count();
    core.open_chat(User {
        id: "peer".to_string(),
        first_name: "Peer".to_string(),
        last_name: "Tester".to_string(),
        email: "peer@example.com".to_string(),
        avatar: String::new(),
    });
    core.send_message("ping").unwrap();

    assert_eq!(TestHelper::stored_message_count(), before + 1);
    // 自タブの書き込みではstorageイベントは来ない
    assert!(!core.poll_changes());

    core.log_out();
}
