pub mod local;
pub mod mock;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::Result;
use crate::types::ChangeEvent;

/// Storage抽象trait
///
/// ブラウザのlocalStorageと同じく文字列のKey-Valueストア。
/// 全操作は同期。WASM環境ではシングルスレッドのため、Send + Sync要件なし
pub trait Storage {
    /// 値取得
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// 値保存
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// 値削除
    fn remove_item(&self, key: &str) -> Result<()>;

    /// 変更通知を購読
    ///
    /// 通知は書き込みを行ったタブ自身には届かない（他タブのみ）。
    /// 返された`Subscription`をdropすると購読解除される。
    fn watch(&self) -> Result<Subscription>;
}

/// 変更通知の購読
pub struct Subscription {
    events: UnboundedReceiver<ChangeEvent>,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(events: UnboundedReceiver<ChangeEvent>, release: impl FnOnce() + 'static) -> Self {
        Self {
            events,
            release: Some(Box::new(release)),
        }
    }

    /// 受信済みの通知を取得（キューをクリア）
    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        let mut result = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            result.push(event);
        }
        result
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
