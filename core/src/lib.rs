pub mod types;
pub mod storage;
pub mod store;
pub mod session;
pub mod chat;
pub mod config;
pub mod clock;
pub mod error;

use std::sync::Arc;

pub use error::{CoreError, Result};

use crate::chat::ChatLine;
use crate::config::CoreConfig;
use crate::session::SessionState;
use crate::storage::{Storage, Subscription};
use crate::store::Store;
use crate::types::{Message, Post, SignUpForm, User};

/// CoreHandle: UIから使用されるメインAPI
///
/// 1タブ分の状態（ユーザー・投稿・メッセージのミラーとセッション）を持つ。
/// 他タブの書き込みは`poll_changes()`で拾ってコレクション全体を読み直す。
pub struct CoreHandle {
    store: Store,
    session: SessionState,
    users: Vec<User>,
    posts: Vec<Post>,
    messages: Vec<Message>,
    selected_friend: Option<User>,
    // dropで購読解除
    subscription: Subscription,
}

impl CoreHandle {
    /// 初期化（購読開始 + セッション復元 + 初回読み込み）
    ///
    /// 自タブの書き込みは通知されないので、初回は必ず自分で読み込む。
    pub fn mount(storage: Arc<dyn Storage>, config: &CoreConfig) -> Result<Self> {
        let store = Store::new(storage, config.keys.clone());
        let subscription = store.watch()?;
        let session = SessionState::restore(&store);

        let mut handle = Self {
            store,
            session,
            users: Vec::new(),
            posts: Vec::new(),
            messages: Vec::new(),
            selected_friend: None,
            subscription,
        };
        handle.sync();

        log::info!("Core mounted (logged_in={})", handle.session.is_logged_in());
        Ok(handle)
    }

    /// コレクション全体を読み直す
    pub fn sync(&mut self) {
        self.users = self.store.get_users();
        self.posts = self.store.get_posts();
        self.messages = self.store.get_messages();
        log::debug!(
            "Synced: {} users, {} posts, {} messages",
            self.users.len(),
            self.posts.len(),
            self.messages.len()
        );
    }

    /// 他タブからの変更通知を処理
    ///
    /// 通知が溜まっていれば1回だけ読み直してtrueを返す。
    pub fn poll_changes(&mut self) -> bool {
        let events = self.subscription.drain();
        if events.is_empty() {
            return false;
        }

        for event in &events {
            log::debug!("Storage changed in another tab: {:?}", event.key);
        }
        self.sync();
        true
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// メールアドレスでログイン
    pub fn log_in(&mut self, email: &str) -> Result<User> {
        if email.trim().is_empty() {
            return Err(CoreError::Auth("Please enter your email".to_string()));
        }

        let user = self
            .store
            .find_user_by_email(email)
            .ok_or_else(|| CoreError::Auth(format!("No account found for {}", email.trim())))?;

        self.enter_session(user.clone());
        Ok(user)
    }

    /// 新規登録してログイン
    pub fn sign_up(&mut self, form: SignUpForm) -> Result<User> {
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        let email = form.email.trim();

        if first_name.is_empty() || last_name.is_empty() {
            return Err(CoreError::Auth("Please enter your first and last name".to_string()));
        }
        if !email.contains('@') {
            return Err(CoreError::Auth("Please enter a valid email".to_string()));
        }
        if self.store.find_user_by_email(email).is_some() {
            return Err(CoreError::Auth(format!("An account already exists for {}", email)));
        }

        let id = clock::next_id();
        let avatar = match form.avatar.trim() {
            "" => default_avatar(&id),
            url => url.to_string(),
        };
        let user = User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            avatar,
        };

        self.store.add_user(&user);
        self.users = self.store.get_users();
        log::info!("Signed up {}", user.id);

        self.enter_session(user.clone());
        Ok(user)
    }

    /// ログアウト
    pub fn log_out(&mut self) {
        if let SessionState::LoggedIn(user) = &self.session {
            log::info!("Logged out {}", user.id);
        }
        self.store.clear_session();
        self.session = SessionState::LoggedOut;
        self.selected_friend = None;
    }

    fn enter_session(&mut self, user: User) {
        log::info!("Logged in {}", user.id);
        self.store.save_session(&user);
        self.session = SessionState::LoggedIn(user);
    }

    /// 自分以外の登録ユーザー
    pub fn friends(&self) -> Vec<&User> {
        let me = self.current_user().map(|u| u.id.as_str());
        self.users.iter().filter(|u| Some(u.id.as_str()) != me).collect()
    }

    /// チャットを開く
    pub fn open_chat(&mut self, friend: User) {
        log::info!("Opened chat with {}", friend.id);
        self.selected_friend = Some(friend);
    }

    pub fn close_chat(&mut self) {
        self.selected_friend = None;
    }

    pub fn selected_friend(&self) -> Option<&User> {
        self.selected_friend.as_ref()
    }

    /// メッセージ送信
    ///
    /// ログイン中かつ相手選択中、本文が空白でない場合のみ送信する。
    pub fn send_message(&mut self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }
        let user = self.session.user()?;
        let friend = self.selected_friend.as_ref()?;

        let message = Message {
            id: clock::next_id(),
            sender_id: user.id.clone(),
            receiver_id: friend.id.clone(),
            sender_name: user.first_name.clone(),
            sender_avatar: user.avatar.clone(),
            text: text.to_string(),
            time: clock::clock_time(),
            is_me: true,
        };

        self.store.send_message(&message);
        self.messages = self.store.get_messages();
        log::info!("Message {} sent to {}", message.id, message.receiver_id);
        Some(message)
    }

    /// 選択中の相手との会話（挿入順）
    pub fn conversation(&self) -> Vec<ChatLine<'_>> {
        match (self.session.user(), self.selected_friend.as_ref()) {
            (Some(me), Some(friend)) => chat::conversation(&self.messages, me, friend),
            _ => Vec::new(),
        }
    }

    /// 投稿作成
    pub fn create_post(&mut self, content: &str, image: Option<String>) -> Option<Post> {
        if content.trim().is_empty() {
            return None;
        }
        let user = self.session.user()?;

        let post = Post {
            id: clock::next_id(),
            author: user.full_name(),
            author_avatar: user.avatar.clone(),
            time: clock::post_time(),
            content: content.trim().to_string(),
            image: image.filter(|url| !url.trim().is_empty()),
            likes: 0,
            comments: 0,
            shares: 0,
        };

        self.store.add_post(&post);
        self.posts = self.store.get_posts();
        log::info!("Post {} created", post.id);
        Some(post)
    }
}

fn default_avatar(id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", id)
}
