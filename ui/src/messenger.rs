use eframe::egui;
use feedlite_core::CoreHandle;

use crate::composer::Composer;

/// チャット一覧と会話画面
pub struct Messenger {
    composer: Composer,
}

impl Messenger {
    pub fn new() -> Self {
        Self {
            composer: Composer::chat(),
        }
    }

    /// チャット一覧（自分以外の登録ユーザー）
    pub fn show_chat_list(&mut self, ui: &mut egui::Ui, core: &mut CoreHandle) {
        crate::emoji_label::emoji_heading(ui, "Chats");
        ui.separator();

        let mut selected = None;
        for friend in core.friends() {
            let row = ui.horizontal(|ui| {
                crate::emoji_label::avatar(ui, &friend.avatar, 48.0);
                ui.vertical(|ui| {
                    ui.strong(friend.full_name());
                    ui.small(egui::RichText::new("● Active now").color(egui::Color32::from_rgb(49, 162, 76)));
                });
            });
            if row.response.interact(egui::Sense::click()).clicked() {
                selected = Some(friend.clone());
            }
            ui.separator();
        }

        if core.users().len() <= 1 {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.weak("Open this app in another tab/browser to chat with another account!");
            });
        }

        if let Some(friend) = selected {
            core.open_chat(friend);
        }
    }

    /// 会話画面
    pub fn show_conversation(&mut self, ctx: &egui::Context, core: &mut CoreHandle) {
        let Some(friend) = core.selected_friend().cloned() else {
            return;
        };

        egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⬅").clicked() {
                    core.close_chat();
                }
                crate::emoji_label::avatar(ui, &friend.avatar, 32.0);
                ui.strong(&friend.first_name);
            });
        });

        egui::TopBottomPanel::bottom("chat_composer").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(text) = self.composer.show(ui, "Send") {
                if core.send_message(&text).is_none() {
                    log::warn!("Message not sent: no session or chat partner");
                }
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in core.conversation() {
                        let layout = if line.is_me {
                            egui::Layout::right_to_left(egui::Align::TOP)
                        } else {
                            egui::Layout::left_to_right(egui::Align::BOTTOM)
                        };

                        ui.with_layout(layout, |ui| {
                            if !line.is_me {
                                crate::emoji_label::avatar(ui, &line.message.sender_avatar, 24.0);
                            }

                            let (fill, text_color) = if line.is_me {
                                (crate::app::BRAND_BLUE, egui::Color32::WHITE)
                            } else {
                                (ui.visuals().extreme_bg_color, ui.visuals().text_color())
                            };

                            egui::Frame::default()
                                .fill(fill)
                                .corner_radius(16.0)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.set_max_width(ui.available_width() * 0.75);
                                    ui.label(egui::RichText::new(&line.message.text).color(text_color));
                                });
                        });
                    }
                });
        });
    }
}
