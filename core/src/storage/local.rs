use tokio::sync::mpsc::unbounded_channel;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{StorageEvent, Window};

use crate::error::{CoreError, Result};
use crate::storage::{Storage, Subscription};
use crate::types::ChangeEvent;

const STORAGE_EVENT: &str = "storage";

/// localStorage実装
///
/// 変更通知はwindowの`storage`イベント。ブラウザは書き込んだタブ自身には
/// このイベントを発火しない。
pub struct LocalStorage {
    window: Window,
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| CoreError::StorageError("No window".to_string()))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| CoreError::StorageError("localStorage is not available".to_string()))?;

        Ok(Self { window, storage })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.storage.get_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // 容量超過（QuotaExceededError）はここでJsErrorになる
        self.storage.set_item(key, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key)?;
        Ok(())
    }

    fn watch(&self) -> Result<Subscription> {
        let (tx, rx) = unbounded_channel();

        let on_storage = Closure::wrap(Box::new(move |event: StorageEvent| {
            let change = ChangeEvent {
                key: event.key(),
                old_value: event.old_value(),
                new_value: event.new_value(),
            };
            if tx.send(change).is_err() {
                log::debug!("storage event dropped: subscription already closed");
            }
        }) as Box<dyn FnMut(StorageEvent)>);

        self.window
            .add_event_listener_with_callback(STORAGE_EVENT, on_storage.as_ref().unchecked_ref())?;
        log::debug!("storage listener registered");

        // クロージャは解除時まで保持する
        let window = self.window.clone();
        Ok(Subscription::new(rx, move || {
            if let Err(e) = window
                .remove_event_listener_with_callback(STORAGE_EVENT, on_storage.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove storage listener: {:?}", e);
            }
            drop(on_storage);
            log::debug!("storage listener removed");
        }))
    }
}
