use eframe::egui;
use std::sync::Arc;
use std::time::Duration;

use feedlite_core::config::CoreConfig;
use feedlite_core::storage::local::LocalStorage;
use feedlite_core::CoreHandle;

use crate::auth::{AuthRequest, AuthScreen};
use crate::composer::Composer;
use crate::messenger::Messenger;

pub const BRAND_BLUE: egui::Color32 = egui::Color32::from_rgb(24, 119, 242);

/// メインナビゲーションのタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Home,
    Friends,
    Messages,
    Notifications,
    Video,
    Menu,
}

impl Tab {
    fn icon(&self) -> &'static str {
        match self {
            Tab::Home => "🏠",
            Tab::Friends => "👥",
            Tab::Messages => "💬",
            Tab::Notifications => "🔔",
            Tab::Video => "📺",
            Tab::Menu => "☰",
        }
    }

    fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Friends, Tab::Messages, Tab::Notifications, Tab::Video, Tab::Menu]
    }
}

/// メインアプリケーション
pub struct FeedApp {
    core: Option<CoreHandle>,
    config: CoreConfig,
    auth: AuthScreen,
    post_composer: Composer,
    messenger: Messenger,
    active_tab: Tab,
    error_message: Option<String>,
}

impl FeedApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let (core, config, error_message) = match Self::mount_core() {
            Ok((core, config)) => (Some(core), config, None),
            Err(e) => {
                log::error!("Failed to initialize core: {:?}", e);
                (None, CoreConfig::default(), Some(e.to_string()))
            }
        };

        Self {
            core,
            config,
            auth: AuthScreen::new(),
            post_composer: Composer::post(),
            messenger: Messenger::new(),
            active_tab: Tab::Home,
            error_message,
        }
    }

    /// Core初期化（localStorage + 設定読み込み + 購読開始）
    fn mount_core() -> feedlite_core::Result<(CoreHandle, CoreConfig)> {
        let storage = LocalStorage::open()?;
        let config = CoreConfig::load(&storage);
        let core = CoreHandle::mount(Arc::new(storage), &config)?;
        Ok((core, config))
    }

    fn handle_auth(&mut self, core: &mut CoreHandle, request: AuthRequest) {
        let result = match request {
            AuthRequest::LogIn { email } => core.log_in(&email),
            AuthRequest::SignUp(form) => core.sign_up(form),
        };

        match result {
            Ok(user) => {
                log::info!("Welcome, {}", user.first_name);
                self.auth.reset();
                self.active_tab = Tab::Home;
            }
            Err(e) => {
                log::warn!("Authentication failed: {}", e);
                self.auth.set_error(e.to_string());
            }
        }
    }

    fn show_main_view(&mut self, ctx: &egui::Context, core: &mut CoreHandle) {
        // トップバー
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("facebook").size(26.0).strong().color(BRAND_BLUE));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(Tab::Menu.icon()).clicked() {
                        self.active_tab = Tab::Menu;
                    }
                });
            });

            // タブ切り替え
            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    ui.selectable_value(&mut self.active_tab, *tab, tab.icon());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.active_tab {
                    Tab::Home => self.show_home(ui, core),
                    Tab::Messages => self.messenger.show_chat_list(ui, core),
                    Tab::Menu => self.show_menu(ui, core),
                    Tab::Friends => placeholder(ui, "Friend requests will appear here."),
                    Tab::Notifications => placeholder(ui, "You have no new notifications."),
                    Tab::Video => placeholder(ui, "Videos from your friends will appear here."),
                });
        });
    }

    fn show_home(&mut self, ui: &mut egui::Ui, core: &mut CoreHandle) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                if let Some(user) = core.current_user() {
                    crate::emoji_label::avatar(ui, &user.avatar, 40.0);
                }
                ui.vertical(|ui| {
                    if let Some(content) = self.post_composer.show(ui, "Post") {
                        if core.create_post(&content, None).is_none() {
                            log::warn!("Post not created: no active session");
                        }
                    }
                });
            });
        });

        ui.add_space(8.0);
        crate::timeline::show(ui, core.posts());
    }

    fn show_menu(&mut self, ui: &mut egui::Ui, core: &mut CoreHandle) {
        if let Some(user) = core.current_user() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    crate::emoji_label::avatar(ui, &user.avatar, 48.0);
                    ui.vertical(|ui| {
                        ui.strong(user.full_name());
                        ui.weak(&user.email);
                    });
                });
            });
        }

        ui.add_space(10.0);

        let logout = egui::RichText::new("Log Out").strong().color(egui::Color32::RED);
        if ui.button(logout).clicked() {
            core.log_out();
            self.active_tab = Tab::Home;
        }
    }
}

fn placeholder(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.weak(text);
    });
}

impl eframe::App for FeedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some(mut core) = self.core.take() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    let error = self.error_message.as_deref().unwrap_or("Storage is not available");
                    ui.colored_label(egui::Color32::RED, error);
                });
            });
            return;
        };

        // 他タブの書き込みを反映
        core.poll_changes();

        if !core.session().is_logged_in() {
            // ログイン画面
            let mut request = None;
            egui::CentralPanel::default().show(ctx, |ui| {
                request = self.auth.show(ui);
            });
            if let Some(request) = request {
                self.handle_auth(&mut core, request);
            }
        } else if core.selected_friend().is_some() {
            self.messenger.show_conversation(ctx, &mut core);
        } else {
            self.show_main_view(ctx, &mut core);
        }

        self.core = Some(core);

        // storageイベントはポーリングで拾うので定期的に再描画する
        ctx.request_repaint_after(Duration::from_millis(self.config.poll_interval_ms));
    }
}
