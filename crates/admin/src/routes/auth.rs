//! Authentication route handlers.
//!
//! Admins and associates each have a login and a registration screen. Both
//! authenticate against the backend, which returns an opaque token; the
//! token is kept in the session and replayed on protected backend calls.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rocket_computers_core::{Email, Role};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::{BackendError, Registration};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

use super::{NavUser, nav};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Admin registration form data.
#[derive(Debug, Deserialize)]
pub struct AdminRegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Associate registration form data.
#[derive(Debug, Deserialize)]
pub struct AssociateRegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template, shared by both roles.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Option<NavUser>,
    pub heading: &'static str,
    pub action: &'static str,
    pub register_href: &'static str,
    pub email: String,
    pub error: Option<String>,
}

/// Registration page template, shared by both roles.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: Option<NavUser>,
    pub heading: &'static str,
    pub action: &'static str,
    pub login_href: &'static str,
    /// Form field carrying the display name (`username` or `name`).
    pub name_field: &'static str,
    pub name_label: &'static str,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Per-role screen wording and paths.
struct Screens {
    role: Role,
    login_path: &'static str,
    register_path: &'static str,
    name_field: &'static str,
    name_label: &'static str,
    login_failed: &'static str,
    register_failed: &'static str,
    registered: &'static str,
}

const ADMIN: Screens = Screens {
    role: Role::Admin,
    login_path: "/login",
    register_path: "/register",
    name_field: "username",
    name_label: "Username",
    login_failed: "Invalid email or password",
    register_failed: "Registration failed",
    registered: "Admin registered successfully",
};

const ASSOCIATE: Screens = Screens {
    role: Role::Associate,
    login_path: "/associate/login",
    register_path: "/associate/register",
    name_field: "name",
    name_label: "Name",
    login_failed: "Error logging in",
    register_failed: "Error registering associate",
    registered: "Registration successful!",
};

impl Screens {
    const fn login_heading(&self) -> &'static str {
        match self.role {
            Role::Admin => "Admin Login",
            Role::Associate => "Associate Login",
        }
    }

    const fn register_heading(&self) -> &'static str {
        match self.role {
            Role::Admin => "Admin Register",
            Role::Associate => "Associate Register",
        }
    }

    fn login_page(
        &self,
        nav: Option<NavUser>,
        email: String,
        error: Option<String>,
    ) -> LoginTemplate {
        LoginTemplate {
            nav,
            heading: self.login_heading(),
            action: self.login_path,
            register_href: self.register_path,
            email,
            error,
        }
    }

    fn register_page(&self, nav: Option<NavUser>) -> RegisterTemplate {
        RegisterTemplate {
            nav,
            heading: self.register_heading(),
            action: self.register_path,
            login_href: self.login_path,
            name_field: self.name_field,
            name_label: self.name_label,
            name: String::new(),
            email: String::new(),
            error: None,
            success: None,
        }
    }

    /// Message shown when login fails. Admin login never echoes the backend.
    fn login_failure(&self, error: Option<&BackendError>) -> String {
        match (self.role, error) {
            (Role::Associate, Some(e)) => e.user_message(self.login_failed),
            _ => self.login_failed.to_string(),
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// GET /login
pub async fn admin_login_page(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    ADMIN.login_page(nav(user.as_ref()), String::new(), None)
}

/// POST /login
pub async fn admin_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    login(&state, &session, &ADMIN, form).await
}

/// GET /associate/login
pub async fn associate_login_page(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    ASSOCIATE.login_page(nav(user.as_ref()), String::new(), None)
}

/// POST /associate/login
pub async fn associate_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    login(&state, &session, &ASSOCIATE, form).await
}

#[instrument(skip_all, fields(role = %screens.role))]
async fn login(state: &AppState, session: &Session, screens: &Screens, form: LoginForm) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return screens
            .login_page(None, form.email, Some(screens.login_failure(None)))
            .into_response();
    };

    let password = SecretString::from(form.password);
    match state
        .backend()
        .login(screens.role, email.as_str(), &password)
        .await
    {
        Ok(token) => {
            let user = CurrentUser {
                role: screens.role,
                email,
                token,
            };
            if let Err(e) = set_current_user(session, &user).await {
                tracing::error!("Failed to set session: {}", e);
                return screens
                    .login_page(None, form.email, Some(screens.login_failed.to_string()))
                    .into_response();
            }
            set_sentry_user(user.email.as_str());
            tracing::info!(email = %user.email, "Logged in");
            Redirect::to("/dashboard").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            screens
                .login_page(None, form.email, Some(screens.login_failure(Some(&e))))
                .into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// GET /register
pub async fn admin_register_page(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    ADMIN.register_page(nav(user.as_ref()))
}

/// POST /register
pub async fn admin_register(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Form(form): Form<AdminRegisterForm>,
) -> impl IntoResponse {
    let registration = Registration {
        display_name: form.username,
        email: form.email,
        password: SecretString::from(form.password),
    };
    register(&state, nav(user.as_ref()), &ADMIN, registration).await
}

/// GET /associate/register
pub async fn associate_register_page(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    ASSOCIATE.register_page(nav(user.as_ref()))
}

/// POST /associate/register
pub async fn associate_register(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Form(form): Form<AssociateRegisterForm>,
) -> impl IntoResponse {
    let registration = Registration {
        display_name: form.name,
        email: form.email,
        password: SecretString::from(form.password),
    };
    register(&state, nav(user.as_ref()), &ASSOCIATE, registration).await
}

#[instrument(skip_all, fields(role = %screens.role))]
async fn register(
    state: &AppState,
    nav: Option<NavUser>,
    screens: &Screens,
    registration: Registration,
) -> RegisterTemplate {
    let mut page = screens.register_page(nav);

    match state.backend().register(screens.role, &registration).await {
        Ok(()) => {
            page.success = Some(screens.registered.to_string());
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            page.error = Some(e.user_message(screens.register_failed));
            page.name = registration.display_name;
            page.email = registration.email;
        }
    }
    page
}

// =============================================================================
// Logout
// =============================================================================

/// POST /logout
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/")
}
