use eframe::egui;
use feedlite_core::types::SignUpForm;

/// ログイン/サインアップ画面
pub struct AuthScreen {
    mode: AuthMode,
    email_input: String,
    first_name_input: String,
    last_name_input: String,
    avatar_input: String,
    error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    SignUp,
}

/// 画面からの要求
#[derive(Debug, Clone)]
pub enum AuthRequest {
    LogIn { email: String },
    SignUp(SignUpForm),
}

impl AuthScreen {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email_input: String::new(),
            first_name_input: String::new(),
            last_name_input: String::new(),
            avatar_input: String::new(),
            error_message: None,
        }
    }

    /// 画面を表示
    /// ボタンが押されたら Some(AuthRequest) を返す
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<AuthRequest> {
        let mut result = None;

        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(
                egui::RichText::new("facebook")
                    .size(40.0)
                    .strong()
                    .color(crate::app::BRAND_BLUE),
            );
            ui.add_space(20.0);

            ui.group(|ui| {
                ui.set_max_width(360.0);

                result = match self.mode {
                    AuthMode::Login => self.show_login(ui),
                    AuthMode::SignUp => self.show_sign_up(ui),
                };
            });

            if let Some(error) = &self.error_message {
                ui.add_space(20.0);
                let error_text = egui::RichText::new(error).color(egui::Color32::RED);
                crate::emoji_label::emoji_label(ui, error_text);
            }
        });

        result
    }

    fn show_login(&mut self, ui: &mut egui::Ui) -> Option<AuthRequest> {
        let mut result = None;

        ui.label("Email");
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.email_input)
                .hint_text("you@example.com")
                .desired_width(f32::INFINITY),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(10.0);

        if ui.button("Log In").clicked() || submitted {
            log::info!("Login requested");
            result = Some(AuthRequest::LogIn {
                email: self.email_input.clone(),
            });
        }

        ui.separator();

        if ui.button("Create new account").clicked() {
            self.mode = AuthMode::SignUp;
            self.error_message = None;
        }

        result
    }

    fn show_sign_up(&mut self, ui: &mut egui::Ui) -> Option<AuthRequest> {
        let mut result = None;

        crate::emoji_label::emoji_heading(ui, "Create a new account");
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.first_name_input).hint_text("First name"));
            ui.add(egui::TextEdit::singleline(&mut self.last_name_input).hint_text("Last name"));
        });
        ui.add(
            egui::TextEdit::singleline(&mut self.email_input)
                .hint_text("Email")
                .desired_width(f32::INFINITY),
        );
        ui.add(
            egui::TextEdit::singleline(&mut self.avatar_input)
                .hint_text("Avatar URL (optional)")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            if ui.button("Back").clicked() {
                self.mode = AuthMode::Login;
                self.error_message = None;
            }

            if ui.button("Sign Up").clicked() {
                log::info!("Sign up requested");
                result = Some(AuthRequest::SignUp(SignUpForm {
                    first_name: self.first_name_input.clone(),
                    last_name: self.last_name_input.clone(),
                    email: self.email_input.clone(),
                    avatar: self.avatar_input.clone(),
                }));
            }
        });

        result
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// 入力をクリアしてログイン画面に戻す
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
