use async_trait::async_trait;
use jsonwebtoken::TokenData;
use uuid::Uuid;

use crate::{
    entities::{token::{Claims, RefreshClaims}, user::{AppRole, User}},
    errors::AuthError,
};

#[async_trait]
pub trait TokenServiceRepository: Send + Sync {
    /// Creates an access JWT carrying the user's roles
    fn create_jwt(&self, user: &User, roles: &[AppRole]) -> Result<String, AuthError>;

    fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError>;

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError>;

    /// Deny-lists an access token until it expires. No-op without Redis.
    async fn revoke_access_token(&self, token: &str) -> Result<(), AuthError>;

    /// Deny-lists a refresh token until it expires. No-op without Redis.
    async fn revoke_refresh_token(&self, token: &str) -> Result<(), AuthError>;

    async fn is_access_revoked(&self, token: &str) -> Result<bool, AuthError>;

    async fn is_refresh_revoked(&self, token: &str) -> Result<bool, AuthError>;
}
