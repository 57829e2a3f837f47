//! Runs against a real Postgres. Set `TEST_DATABASE_URL` and use
//! `cargo test -- --ignored`.

mod common;

use uuid::Uuid;

use portfolio_cms::{
    auth::jwt::JwtService,
    db::postgres::{create_pool, run_migrations},
    entities::{invitation::InvitationInsert, user::{AppRole, RegisterRequest}},
    errors::AppError,
    repositories::{
        invitation::InvitationRepository,
        sqlx_repo::{SqlxInvitationRepo, SqlxUserRepo},
        user::UserRepository,
    },
    use_cases::auth::AuthHandler,
};

use common::test_config;

#[actix_rt::test]
#[ignore]
async fn single_use_code_admits_one_account() {
    let config = test_config();
    let pool = create_pool(&config.database_url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let code = format!("T{}", &Uuid::new_v4().simple().to_string()[..10]).to_uppercase();
    let invitations = SqlxInvitationRepo::new(pool.clone());
    invitations
        .create(&InvitationInsert {
            code: code.clone(),
            role: AppRole::Admin,
            max_uses: 1,
            expires_at: None,
            created_by: None,
        })
        .await
        .unwrap();

    let handler = AuthHandler::new(
        SqlxUserRepo::new(pool.clone()),
        SqlxInvitationRepo::new(pool.clone()),
        JwtService::new(&config, None),
    );

    let register = |email: String| -> RegisterRequest {
        serde_json::from_value(serde_json::json!({
            "fullName": "Test Admin",
            "email": email,
            "password": "Kawa!Zielona42Ogrod",
            "invitationCode": code.to_lowercase(),
        }))
        .unwrap()
    };

    let first = handler
        .register(register(format!("{}@example.com", Uuid::new_v4())))
        .await
        .unwrap();
    assert!(handler.user_repo.has_role(&first.id, AppRole::Admin).await.unwrap());

    let second_email = format!("{}@example.com", Uuid::new_v4());
    let err = handler.register(register(second_email.clone())).await.err().unwrap();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Failed to assign role"));

    // The rolled back transaction leaves no account behind.
    assert!(handler.user_repo.get_user_by_email(&second_email).await.unwrap().is_none());

    let stored = invitations.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(stored.current_uses, Some(1));
    assert_eq!(stored.used_by, Some(first.id));
}
