use axum::http::Method;

use super::dto::{
    ChangePasswordRequest, CookieLoginRequest, LoginRequest, RegisterRequest, SessionStatus,
    UpdateProfileRequest, UserProfile,
};
use crate::backend::BackendClient;
use crate::error::ApiError;
use crate::session::AuthSession;

impl BackendClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, None, "/api/auth/login", &body)
            .await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, None, "/api/auth/register", &body)
            .await
    }

    pub async fn cookie_login(&self, refresh_token_id: &str) -> Result<AuthSession, ApiError> {
        let body = CookieLoginRequest {
            refresh_token_id: refresh_token_id.to_string(),
        };
        self.send_json(Method::POST, None, "/api/auth/cookie-login", &body)
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.send_empty(Method::POST, token, "/api/auth/logout")
            .await
    }

    pub async fn auth_status(&self, token: &str) -> Result<SessionStatus, ApiError> {
        self.get_json(token, "/api/auth/status").await
    }

    pub async fn auth_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.get_json(token, "/api/auth/profile").await
    }

    pub async fn update_profile(
        &self,
        token: &str,
        update: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        self.send_json(Method::PUT, Some(token), "/api/profile", update)
            .await
    }

    pub async fn change_password(
        &self,
        token: &str,
        change: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        self.send_json_unit(Method::PUT, token, "/api/password", change)
            .await
    }

    pub async fn delete_account(&self, token: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, token, "/api/account").await
    }
}
