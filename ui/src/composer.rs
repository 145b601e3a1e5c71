use eframe::egui;

/// テキスト入力UI（投稿・チャット共通）
pub struct Composer {
    text: String,
    hint: &'static str,
    multiline: bool,
}

impl Composer {
    /// 投稿用（複数行）
    pub fn post() -> Self {
        Self {
            text: String::new(),
            hint: "What's on your mind?",
            multiline: true,
        }
    }

    /// チャット用（1行、Enterで送信）
    pub fn chat() -> Self {
        Self {
            text: String::new(),
            hint: "Aa",
            multiline: false,
        }
    }

    /// コンポーザーを表示
    /// 送信されたら Some(content) を返す
    pub fn show(&mut self, ui: &mut egui::Ui, send_label: &str) -> Option<String> {
        let mut should_send = false;

        if self.multiline {
            ui.vertical(|ui| {
                let response = ui.add(
                    egui::TextEdit::multiline(&mut self.text)
                        .desired_width(f32::INFINITY)
                        .desired_rows(3)
                        .hint_text(self.hint),
                );

                // Enter + Ctrl/Cmd で送信
                if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.command) {
                    should_send = true;
                }

                ui.horizontal(|ui| {
                    let enabled = !self.text.trim().is_empty();
                    if ui.add_enabled(enabled, egui::Button::new(send_label)).clicked() {
                        should_send = true;
                    }
                    ui.label(format!("{} chars", self.text.chars().count()));
                });
            });
        } else {
            ui.horizontal(|ui| {
                let enabled = !self.text.trim().is_empty();
                let send_width = 60.0;
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.text)
                        .desired_width(ui.available_width() - send_width)
                        .hint_text(self.hint),
                );

                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    should_send = true;
                    response.request_focus();
                }

                if ui.add_enabled(enabled, egui::Button::new(send_label)).clicked() {
                    should_send = true;
                }
            });
        }

        if should_send && !self.text.trim().is_empty() {
            let content = self.text.clone();
            self.text.clear();
            Some(content)
        } else {
            None
        }
    }
}
