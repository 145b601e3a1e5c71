use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::error::Result;
use crate::storage::{Storage, Subscription};
use crate::types::ChangeEvent;

/// テスト用の共有ストレージ領域
///
/// 同じブラウザプロファイルを共有する複数タブを模擬する。
/// `open_tab()`で各タブ用の`MockStorage`を作る。
#[derive(Clone, Default)]
pub struct MockPartition {
    inner: Arc<Mutex<PartitionState>>,
}

#[derive(Default)]
struct PartitionState {
    items: HashMap<String, String>,
    listeners: Vec<Listener>,
    next_tab: u64,
    next_listener: u64,
}

struct Listener {
    id: u64,
    tab: u64,
    tx: UnboundedSender<ChangeEvent>,
}

impl MockPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいタブを開く
    pub fn open_tab(&self) -> MockStorage {
        let tab = {
            let mut state = self.lock();
            state.next_tab += 1;
            state.next_tab
        };
        MockStorage {
            partition: self.clone(),
            tab,
        }
    }

    /// 登録中のリスナー数
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, PartitionState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// `writer`以外のタブに通知
    fn notify(&self, writer: u64, event: ChangeEvent) {
        let mut state = self.lock();
        // 受信側がdrop済みのリスナーは取り除く
        state.listeners.retain(|l| l.tab == writer || l.tx.send(event.clone()).is_ok());
    }

    fn remove_listener(&self, id: u64) {
        self.lock().listeners.retain(|l| l.id != id);
    }
}

/// テスト用のモックStorage実装（1タブ分）
#[derive(Clone)]
pub struct MockStorage {
    partition: MockPartition,
    tab: u64,
}

impl MockStorage {
    /// 専用の領域を持つ単独タブ
    pub fn new() -> Self {
        MockPartition::new().open_tab()
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MockStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.partition.lock().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let old_value = self
            .partition
            .lock()
            .items
            .insert(key.to_string(), value.to_string());

        // ブラウザと同じく、値が変わらない書き込みは通知しない
        if old_value.as_deref() != Some(value) {
            self.partition.notify(
                self.tab,
                ChangeEvent {
                    key: Some(key.to_string()),
                    old_value,
                    new_value: Some(value.to_string()),
                },
            );
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let old_value = self.partition.lock().items.remove(key);
        if old_value.is_some() {
            self.partition.notify(
                self.tab,
                ChangeEvent {
                    key: Some(key.to_string()),
                    old_value,
                    new_value: None,
                },
            );
        }
        Ok(())
    }

    fn watch(&self) -> Result<Subscription> {
        let (tx, rx) = unbounded_channel();
        let id = {
            let mut state = self.partition.lock();
            state.next_listener += 1;
            let id = state.next_listener;
            state.listeners.push(Listener { id, tab: self.tab, tx });
            id
        };

        let partition = self.partition.clone();
        Ok(Subscription::new(rx, move || partition.remove_listener(id)))
    }
}
