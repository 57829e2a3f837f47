use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPageRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxBlogPostRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxMediaRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSiteSettingRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxInvitationRepo {
    pub pool: PgPool,
}
