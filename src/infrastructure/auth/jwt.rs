use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};
use redis::{AsyncCommands, Client as RedisClient};
use uuid::Uuid;

use crate::entities::token::{Claims, RefreshClaims};
use crate::entities::user::{AppRole, User};
use crate::errors::AuthError;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;
const ACCESS_DENY_PREFIX: &str = "access_deny";
const REFRESH_DENY_PREFIX: &str = "refresh_deny";

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
    refresh_expiration: Duration,
    redis: Option<RedisClient>,
}

impl JwtService {
    pub fn new(config: &AppConfig, redis: Option<RedisClient>) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
            refresh_expiration: Duration::days(config.refresh_token_exp_days),
            redis,
        }
    }

    fn remaining_ttl(exp: usize) -> Result<u64, AuthError> {
        let now = Utc::now().timestamp() as usize;
        if exp <= now {
            return Err(AuthError::InvalidToken);
        }
        Ok((exp - now) as u64)
    }

    async fn deny(&self, prefix: &str, token: &str, ttl_seconds: u64) -> Result<(), AuthError> {
        let Some(client) = &self.redis else {
            tracing::debug!("Redis not configured, skipping token revocation");
            return Ok(());
        };

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AuthError::RedisConnection(e.to_string()))?;

        conn.set_ex::<_, _, ()>(format!("{}:{}", prefix, token), 1, ttl_seconds)
            .await
            .map_err(|e| AuthError::RedisOperation(e.to_string()))
    }

    async fn is_denied(&self, prefix: &str, token: &str) -> Result<bool, AuthError> {
        let Some(client) = &self.redis else {
            return Ok(false);
        };

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AuthError::RedisConnection(e.to_string()))?;

        conn.exists::<_, bool>(format!("{}:{}", prefix, token))
            .await
            .map_err(|e| AuthError::RedisOperation(e.to_string()))
    }
}

#[async_trait]
impl TokenServiceRepository for JwtService {
    fn create_jwt(&self, user: &User, roles: &[AppRole]) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            roles: roles.to_vec(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.refresh_expiration).timestamp() as usize;

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.refresh_encoding).map_err(AuthError::from)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }

    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<RefreshClaims>(token, &self.keys.refresh_decoding, &validation).map_err(AuthError::from)
    }

    async fn revoke_access_token(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.decode_jwt(token)?.claims;
        let ttl = Self::remaining_ttl(claims.exp)?;
        self.deny(ACCESS_DENY_PREFIX, token, ttl).await
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.decode_refresh_jwt(token)?.claims;
        let ttl = Self::remaining_ttl(claims.exp)?;
        self.deny(REFRESH_DENY_PREFIX, token, ttl).await
    }

    async fn is_access_revoked(&self, token: &str) -> Result<bool, AuthError> {
        self.is_denied(ACCESS_DENY_PREFIX, token).await
    }

    async fn is_refresh_revoked(&self, token: &str) -> Result<bool, AuthError> {
        self.is_denied(REFRESH_DENY_PREFIX, token).await
    }
}
