use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Local, Utc};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// 現在のUNIXタイムスタンプ（ミリ秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// ミリ秒タイムスタンプのID生成
///
/// 同じミリ秒内で呼ばれても、このプロセス内では必ず増加する。
pub fn next_id() -> String {
    let now = now_millis();
    let previous = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or(now);
    now.max(previous + 1).to_string()
}

/// メッセージ用の時刻（HH:MM）
pub fn clock_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// 投稿用の日時
pub fn post_time() -> String {
    Local::now().format("%b %-d at %H:%M").to_string()
}
