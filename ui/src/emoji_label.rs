use egui_twemoji::EmojiLabel;

/// カラー絵文字をサポートするラベルを表示
pub fn emoji_label(ui: &mut egui::Ui, text: impl Into<egui::RichText>) {
    EmojiLabel::new(text.into()).show(ui);
}

/// カラー絵文字をサポートするヘッダーを表示
pub fn emoji_heading(ui: &mut egui::Ui, text: impl Into<String>) {
    let rich_text = egui::RichText::new(text.into()).heading();
    EmojiLabel::new(rich_text).show(ui);
}

/// アバター画像（URLが空なら絵文字）
pub fn avatar(ui: &mut egui::Ui, url: &str, size: f32) {
    if url.is_empty() {
        emoji_label(ui, egui::RichText::new("👤").size(size * 0.8));
        return;
    }

    ui.add(
        egui::Image::new(url)
            .fit_to_exact_size(egui::vec2(size, size))
            .corner_radius(size / 2.0),
    );
}
