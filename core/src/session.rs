use crate::store::Store;
use crate::types::User;

/// ログイン状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(User),
}

impl SessionState {
    /// 起動時にセッションキーから復元
    pub fn restore(store: &Store) -> Self {
        match store.load_session() {
            Some(user) => {
                log::info!("Restored session for {}", user.id);
                SessionState::LoggedIn(user)
            }
            None => SessionState::LoggedOut,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::LoggedIn(user) => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn(_))
    }
}
