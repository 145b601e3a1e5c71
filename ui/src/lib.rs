mod app;
mod auth;
mod composer;
mod emoji_label;
mod messenger;
mod timeline;

pub use app::FeedApp;

use feedlite_core::config::CoreConfig;
use feedlite_core::storage::local::LocalStorage;
use wasm_bindgen::prelude::*;

/// WASM初期化とパニックフック設定
#[wasm_bindgen(start)]
pub fn start() {
    // パニック時にコンソールにスタックトレースを表示
    console_error_panic_hook::set_once();

    // ログ設定（レベルは保存済みの設定から）
    let level = match LocalStorage::open() {
        Ok(storage) => CoreConfig::load(&storage).log_level(),
        Err(_) => log::Level::Debug,
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }

    log::info!("feedlite WASM initialized");
}

/// Webアプリケーションのエントリーポイント
#[wasm_bindgen]
pub async fn start_app(canvas_id: String) -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;

    let canvas = document
        .get_element_by_id(&canvas_id)
        .ok_or("Canvas not found")?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let web_options = eframe::WebOptions::default();

    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(|cc| {
                let mut style = (*cc.egui_ctx.style()).clone();
                style.text_styles = [
                    (egui::TextStyle::Heading, egui::FontId::new(24.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Body, egui::FontId::new(16.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Button, egui::FontId::new(18.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Small, egui::FontId::new(13.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Monospace, egui::FontId::new(14.0, egui::FontFamily::Monospace)),
                ].into();

                style.spacing.item_spacing = egui::vec2(8.0, 8.0);
                style.spacing.button_padding = egui::vec2(12.0, 6.0);

                cc.egui_ctx.set_style(style);

                Ok(Box::new(FeedApp::new(cc)))
            }),
        )
        .await?;

    Ok(())
}
