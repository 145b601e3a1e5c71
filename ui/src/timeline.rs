use eframe::egui;
use feedlite_core::types::Post;

/// ニュースフィード表示（新しい順）
pub fn show(ui: &mut egui::Ui, posts: &[Post]) {
    if posts.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.weak("No posts yet. Start the conversation!");
        });
        return;
    }

    for post in posts.iter().rev() {
        show_post(ui, post);
        ui.add_space(8.0);
    }
}

fn show_post(ui: &mut egui::Ui, post: &Post) {
    egui::Frame::default()
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            // ヘッダー（アバター + 名前 + 時刻）
            ui.horizontal(|ui| {
                crate::emoji_label::avatar(ui, &post.author_avatar, 40.0);
                ui.vertical(|ui| {
                    ui.strong(&post.author);
                    ui.small(&post.time);
                });
            });

            ui.add_space(6.0);
            crate::emoji_label::emoji_label(ui, post.content.as_str());

            if let Some(image) = &post.image {
                ui.add_space(6.0);
                ui.add(egui::Image::new(image.as_str()).max_width(ui.available_width()));
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.small(format!("👍 {}", post.likes));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("{} shares", post.shares));
                    ui.small(format!("{} comments", post.comments));
                });
            });

            ui.separator();

            show_actions(ui);
        });
}

/// アクション行
///
/// 投稿は不変なので、いいね・コメント・シェアは押せない状態で表示する。
fn show_actions(ui: &mut egui::Ui) -> Vec<egui::Response> {
    ui.horizontal(|ui| {
        ["👍 Like", "💬 Comment", "↗ Share"]
            .into_iter()
            .map(|label| ui.add_enabled(false, egui::Button::new(label).small()))
            .collect()
    })
    .inner
}
