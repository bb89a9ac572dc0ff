//! Language toggle, registration, login and password reset.

use super::SectionContext;
use landwatch_core::model::{LoginRequest, RegisterRequest};
use landwatch_core::{Role, SessionCredentials};

pub const LANGUAGE_SELECT: &str = "languageSelect";

/// Translated elements carry this prefix followed by the translation key,
/// e.g. `i18n-hero_title`.
pub const TRANSLATION_PREFIX: &str = "i18n-";

pub const REGISTER_FORM: &str = "registerForm";
pub const REGISTER_NAME: &str = "regName";
pub const REGISTER_EMAIL: &str = "regEmail";
pub const REGISTER_PASSWORD: &str = "regPassword";
pub const REGISTER_CONFIRM: &str = "regConfirmPassword";
pub const REGISTER_ROLE: &str = "regRole";
pub const REGISTER_ERROR: &str = "registerError";
pub const REGISTER_SUCCESS: &str = "registerSuccess";

pub const LOGIN_FORM: &str = "loginForm";
pub const LOGIN_EMAIL: &str = "loginEmail";
pub const LOGIN_PASSWORD: &str = "loginPassword";
pub const LOGIN_ROLE: &str = "loginRole";
pub const LOGIN_ERROR: &str = "loginError";

pub const FORGOT_FORM: &str = "forgotPasswordForm";
pub const FORGOT_EMAIL: &str = "forgotEmail";
pub const FORGOT_MESSAGE: &str = "forgotMessage";

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
const REGISTERED: &str = "Registration successful! Redirecting to login...";
const RESET_SENT: &str = "If the email is registered, a reset link has been sent.";

// =============================================================================
// Language
// =============================================================================

pub struct LanguageSection {
    cx: SectionContext,
}

impl LanguageSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(LANGUAGE_SELECT).map(|cx| Self { cx })
    }

    /// Selection changed: store the language server-side and reload.
    pub async fn on_change(&self) {
        let language = self.cx.page.field(LANGUAGE_SELECT);
        match self.cx.client.set_language(&language).await {
            Ok(_) => self.cx.page.reload(),
            Err(e) => self.cx.failed("set language", &e),
        }
    }
}

/// Fills translated elements with the texts of the selected language.
pub struct TranslationsSection {
    cx: SectionContext,
}

impl TranslationsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(LANGUAGE_SELECT).map(|cx| Self { cx })
    }

    /// Page load. A blank selector leaves the choice to the server session.
    /// On failure the page keeps its built-in texts.
    pub async fn load(&self) {
        let page = &self.cx.page;
        let selected = page.field_value(LANGUAGE_SELECT);
        let language = selected.as_deref().map(str::trim).filter(|l| !l.is_empty());

        let translations = match self.cx.client.translations(language).await {
            Ok(translations) => translations,
            Err(e) => {
                self.cx.failed("load translations", &e);
                return;
            }
        };

        let mut applied = 0;
        for (key, text) in translations.texts() {
            let id = format!("{TRANSLATION_PREFIX}{key}");
            if page.has_element(&id) {
                page.set_text(&id, text);
                applied += 1;
            }
        }
        tracing::debug!(language = ?language, applied, "Translations applied");
    }
}

// =============================================================================
// Register
// =============================================================================

pub struct RegisterSection {
    cx: SectionContext,
}

impl RegisterSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(REGISTER_FORM).map(|cx| Self { cx })
    }

    pub async fn submit(&self) {
        let page = &self.cx.page;
        page.set_visible(REGISTER_ERROR, false);
        page.set_visible(REGISTER_SUCCESS, false);

        let password = page.field(REGISTER_PASSWORD);
        if password != page.field(REGISTER_CONFIRM) {
            page.show_banner(REGISTER_ERROR, PASSWORD_MISMATCH);
            return;
        }

        let request = RegisterRequest {
            name: page.field(REGISTER_NAME),
            email: page.field(REGISTER_EMAIL),
            password,
            role: page.field(REGISTER_ROLE),
        };

        match self.cx.client.register(&request).await {
            Ok(value) => {
                let message = value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .unwrap_or(REGISTERED);
                page.show_banner(REGISTER_SUCCESS, message);
                page.reset_form(REGISTER_FORM);
                page.navigate_after(
                    &self.cx.config.routes.login_page,
                    self.cx.config.ui.redirect_delay(),
                );
                tracing::info!(email = %request.email, "Registered");
            }
            Err(e) => {
                self.cx.failed("register", &e);
                page.show_banner(REGISTER_ERROR, &e.user_message());
            }
        }
    }
}

// =============================================================================
// Login
// =============================================================================

pub struct LoginSection {
    cx: SectionContext,
}

impl LoginSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(LOGIN_FORM).map(|cx| Self { cx })
    }

    /// Log in, store the credentials, then navigate by role.
    pub async fn submit(&self) {
        let page = &self.cx.page;
        page.set_visible(LOGIN_ERROR, false);

        let request = LoginRequest {
            email: page.field(LOGIN_EMAIL),
            password: page.field(LOGIN_PASSWORD),
            role: page.field(LOGIN_ROLE),
        };

        let response = match self.cx.client.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.cx.failed("login", &e);
                page.show_banner(LOGIN_ERROR, &e.user_message());
                return;
            }
        };

        // A missing or unknown role keeps the one the user picked.
        let role = response
            .parsed_role()
            .or_else(|| request.role.parse().ok())
            .unwrap_or(Role::Public);
        if let (None, Some(returned)) = (response.parsed_role(), response.role.as_deref()) {
            tracing::warn!(role = %returned, fallback = %role, "Unknown role in login response");
        }
        self.cx
            .client
            .session()
            .set(SessionCredentials::new(response.token.unwrap_or_default(), role));

        let routes = &self.cx.config.routes;
        let target = if role.is_admin() {
            &routes.admin_page
        } else {
            &routes.default_page
        };
        tracing::info!(role = %role, target = %target, "Logged in");
        page.navigate(target);
    }
}

// =============================================================================
// Forgot password
// =============================================================================

pub struct ForgotPasswordSection {
    cx: SectionContext,
}

impl ForgotPasswordSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(FORGOT_FORM).map(|cx| Self { cx })
    }

    pub async fn submit(&self) {
        let email = self.cx.page.field(FORGOT_EMAIL);
        let message = match self.cx.client.forgot_password(&email).await {
            Ok(message) if message.is_empty() => RESET_SENT.to_string(),
            Ok(message) => message,
            Err(e) => {
                self.cx.failed("forgot password", &e);
                e.user_message()
            }
        };
        self.cx.page.show_banner(FORGOT_MESSAGE, &message);
    }
}
