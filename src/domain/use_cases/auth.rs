use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::token::AuthResponse;
use crate::entities::user::{LoginUser, MeResponse, NewUserResponse, RegisterRequest, User};
use crate::errors::{AppError, AuthError};
use crate::repositories::{
    invitation::InvitationRepository, token::TokenServiceRepository, user::UserRepository,
};

pub struct AuthHandler<R, I, T>
where
    R: UserRepository,
    I: InvitationRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub invitation_repo: I,
    pub token_service: T,
}

impl<R, I, T> AuthHandler<R, I, T>
where
    R: UserRepository,
    I: InvitationRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, invitation_repo: I, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            invitation_repo,
            token_service,
        }
    }

    /// Registers an account by redeeming an invitation code
    pub async fn register(&self, request: RegisterRequest) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let invitation = self
            .invitation_repo
            .find_by_code(&request.invitation_code)
            .await?
            .ok_or_else(|| AppError::InvalidInput("Invalid or expired invitation code".to_string()))?;

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let user_id = self
            .user_repo
            .create_user_with_invitation(&user_insert, &invitation.code)
            .await?
            .ok_or_else(|| {
                tracing::warn!(code = %invitation.code, "Invitation code could not be redeemed");
                AppError::InvalidInput("Failed to assign role".to_string())
            })?;

        tracing::info!(%user_id, role = invitation.role.as_str(), "User registered with invitation");
        Ok(NewUserResponse {
            id: user_id,
            role: invitation.role,
            message: "Account created successfully".to_string(),
        })
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user).await?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(response)
    }

    /// Issues an access/refresh pair with the user's current roles
    pub async fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let roles = self.user_repo.get_roles(&user.id)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to load roles: {}", e);
                AuthError::TokenCreation
            })?;

        let access_token = self.token_service.create_jwt(user, &roles)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;

        if self.token_service.is_refresh_revoked(token).await? {
            return Err(AuthError::TokenRevoked);
        }

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&user).await
    }

    /// Deny-lists both tokens for the rest of their lifetime
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        self.token_service.revoke_access_token(access_token).await?;
        self.token_service.revoke_refresh_token(refresh_token).await?;
        Ok(())
    }

    pub async fn me(&self, user_id: &Uuid) -> Result<MeResponse, AppError> {
        let profile = self.user_repo.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let roles = self.user_repo.get_roles(user_id).await?;

        Ok(MeResponse {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            roles,
        })
    }
}
