//! Session endpoints.

use async_trait::async_trait;

use super::client::ApiClient;
use super::envelope::parse_entity;
use crate::errors::ClientError;
use crate::models::{LoginRequest, User};
use crate::session::AuthApi;

impl ApiClient {
    pub async fn me(&self) -> Result<User, ClientError> {
        let value = self.get("/auth/me").await?;
        parse_entity(value, "user")
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ClientError> {
        let value = self.post("/auth/login", credentials).await?;
        parse_entity(value, "user")
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.post("/auth/logout", &serde_json::json!({})).await.map(|_| ())
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn me(&self) -> Result<User, ClientError> {
        ApiClient::me(self).await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<User, ClientError> {
        ApiClient::login(self, credentials).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        ApiClient::logout(self).await
    }

    fn session_cookie(&self) -> Option<String> {
        ApiClient::session_cookie(self)
    }

    fn restore_session_cookie(&self, header: &str) {
        ApiClient::restore_session_cookie(self, header)
    }
}
