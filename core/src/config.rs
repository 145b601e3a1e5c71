use serde::{Deserialize, Serialize};

use crate::storage::Storage;

/// 保存キー一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub users: String,
    pub posts: String,
    pub messages: String,
    pub session: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            users: "fb_lite_users".to_string(),
            posts: "fb_lite_posts".to_string(),
            messages: "fb_lite_messages".to_string(),
            session: "active_fb_lite_user".to_string(),
        }
    }
}

/// アプリ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub keys: StorageKeys,
    pub log_level: String,
    /// 変更通知をポーリングする間隔（UIの再描画間隔）
    pub poll_interval_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            log_level: "debug".to_string(),
            poll_interval_ms: 250,
        }
    }
}

impl CoreConfig {
    pub const STORAGE_KEY: &'static str = "fb_lite_config";

    /// Storageから読み込み（無い・壊れている場合はデフォルト）
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config under {}: {}", Self::STORAGE_KEY, e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Failed to read config: {}", e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Debug)
    }
}
