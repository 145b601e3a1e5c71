use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StorageKeys;
use crate::error::Result;
use crate::storage::{Storage, Subscription};
use crate::types::{Message, Post, User};

/// JSONコレクションの永続化層
///
/// 読み込みの失敗は全て空コレクションに変換し、書き込みの失敗はログに残して
/// 呼び出し側には返さない。コレクションは常に全体を読み書きする
/// （read-modify-write）。複数タブが同時に追記した場合は後勝ちになる。
pub struct Store {
    storage: Arc<dyn Storage>,
    keys: StorageKeys,
}

impl Store {
    pub fn new(storage: Arc<dyn Storage>, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    pub fn get_users(&self) -> Vec<User> {
        self.read_collection(&self.keys.users)
    }

    pub fn get_posts(&self) -> Vec<Post> {
        self.read_collection(&self.keys.posts)
    }

    pub fn get_messages(&self) -> Vec<Message> {
        self.read_collection(&self.keys.messages)
    }

    /// メッセージを末尾に追加
    pub fn send_message(&self, message: &Message) {
        self.append(&self.keys.messages, message);
    }

    /// ユーザー登録
    pub fn add_user(&self, user: &User) {
        self.append(&self.keys.users, user);
    }

    /// 投稿追加
    pub fn add_post(&self, post: &Post) {
        self.append(&self.keys.posts, post);
    }

    /// メールアドレスでユーザー検索（大文字小文字を区別しない）
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim();
        self.get_users()
            .into_iter()
            .find(|u| u.email.trim().eq_ignore_ascii_case(email))
    }

    /// セッション復元
    pub fn load_session(&self) -> Option<User> {
        let json = match self.storage.get_item(&self.keys.session) {
            Ok(value) => value?,
            Err(e) => {
                log::warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Discarding undecodable session: {}", e);
                None
            }
        }
    }

    pub fn save_session(&self, user: &User) {
        if let Err(e) = self.write_json(&self.keys.session, user) {
            log::error!("Failed to save session: {}", e);
        }
    }

    pub fn clear_session(&self) {
        if let Err(e) = self.storage.remove_item(&self.keys.session) {
            log::error!("Failed to clear session: {}", e);
        }
    }

    /// 他タブからの変更通知を購読
    pub fn watch(&self) -> Result<Subscription> {
        self.storage.watch()
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let json = match self.storage.get_item(key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Invalid data under {}, treating as empty: {}", key, e);
            Vec::new()
        })
    }

    fn append<T: Serialize + DeserializeOwned + Clone>(&self, key: &str, item: &T) {
        let mut items: Vec<T> = self.read_collection(key);
        items.push(item.clone());
        if let Err(e) = self.write_json(key, &items) {
            log::error!("Failed to write {}: {}", key, e);
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.storage.set_item(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock::MockStorage;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            first_name: format!("User{}", id),
            last_name: "Test".to_string(),
            email: email.to_string(),
            avatar: String::new(),
        }
    }

    fn message(id: &str, from: &str, to: &str, text: &str) -> Message {
        Message {
            id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            sender_name: String::new(),
            sender_avatar: String::new(),
            text: text.to_string(),
            time: "10:00".to_string(),
            is_me: true,
        }
    }

    fn store_with(storage: &MockStorage) -> Store {
        Store::new(Arc::new(storage.clone()), StorageKeys::default())
    }

    #[test]
    fn test_empty_when_absent() {
        let store = store_with(&MockStorage::new());
        assert!(store.get_users().is_empty());
        assert!(store.get_posts().is_empty());
        assert!(store.get_messages().is_empty());
    }

    #[test]
    fn test_empty_when_invalid() {
        let storage = MockStorage::new();
        let keys = StorageKeys::default();
        storage.set_item(&keys.users, "{not json").unwrap();
        storage.set_item(&keys.posts, r#"{"id":"p1"}"#).unwrap();
        storage.set_item(&keys.messages, "[1, 2, 3]").unwrap();

        let store = store_with(&storage);
        assert!(store.get_users().is_empty());
        assert!(store.get_posts().is_empty());
        assert!(store.get_messages().is_empty());
    }

    #[test]
    fn test_send_message_scenario() {
        let storage = MockStorage::new();
        let store = store_with(&storage);
        store.add_user(&user("1", "a@example.com"));

        store.send_message(&message("m1", "1", "2", "hi"));

        let messages = store.get_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "m1");
        assert_eq!(messages[0].sender_id, "1");
        assert_eq!(messages[0].receiver_id, "2");
        assert_eq!(messages[0].text, "hi");
        assert!(store.get_posts().is_empty());
    }

    #[test]
    fn test_send_message_preserves_call_order() {
        let store = store_with(&MockStorage::new());
        store.send_message(&message("m1", "1", "2", "hi"));
        store.send_message(&message("m2", "1", "2", "yo"));
        store.send_message(&message("m3", "2", "1", "hey"));

        let texts: Vec<_> = store.get_messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["hi", "yo", "hey"]);
    }

    #[test]
    fn test_send_message_overwrites_invalid_collection() {
        let storage = MockStorage::new();
        storage.set_item(&StorageKeys::default().messages, "garbage").unwrap();

        let store = store_with(&storage);
        store.send_message(&message("m1", "1", "2", "hi"));
        assert_eq!(store.get_messages().len(), 1);
    }

    #[test]
    fn test_find_user_by_email() {
        let store = store_with(&MockStorage::new());
        store.add_user(&user("1", "ann@example.com"));
        store.add_user(&user("2", "bob@example.com"));

        let found = store.find_user_by_email("  BOB@example.com ").unwrap();
        assert_eq!(found.id, "2");
        assert!(store.find_user_by_email("carol@example.com").is_none());
    }

    #[test]
    fn test_session_round_trip() {
        let storage = MockStorage::new();
        let store = store_with(&storage);
        assert_eq!(store.load_session(), None);

        let ann = user("1", "ann@example.com");
        store.save_session(&ann);

        // リロード相当
        let reloaded = store_with(&storage);
        assert_eq!(reloaded.load_session(), Some(ann));

        reloaded.clear_session();
        assert_eq!(store_with(&storage).load_session(), None);
    }

    #[test]
    fn test_undecodable_session() {
        let storage = MockStorage::new();
        storage.set_item(&StorageKeys::default().session, "oops").unwrap();
        assert_eq!(store_with(&storage).load_session(), None);
    }
}
