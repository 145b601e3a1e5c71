use serde::{Deserialize, Serialize};

/// 登録ユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
}

impl User {
    /// 表示名（姓名）
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// フィード投稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: String,
    pub author_avatar: String,
    pub time: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

/// ダイレクトメッセージ
///
/// `is_me` は互換性のために保存しているだけで、表示時は
/// `sender_id` と閲覧者を比較して再計算する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub sender_name: String,
    pub sender_avatar: String,
    pub text: String,
    pub time: String,
    #[serde(default)]
    pub is_me: bool,
}

/// サインアップフォームの入力
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 空ならデフォルトのアバターURLを割り当てる
    pub avatar: String,
}

/// ストレージ変更通知
///
/// ペイロードは参考情報。受信側は常にコレクション全体を読み直す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// `None` はストレージ全体のクリア
    pub key: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}
