use std::sync::Arc;

use super::error::DbResult;
use super::repo::{
    AddressRepository, RefreshTokenRepository, RegistrationTokenRepository, RepositoryBase,
    RoleRepository, UserRepository, ValidationCodeRepository,
};
use super::session::DbSession;
use crate::config::DatabaseConfig;

/// One repository per entity kind, all executing against the same
/// session, so writes across entity kinds share the session's
/// transaction.
pub struct UnitOfWork {
    session: Arc<DbSession>,
    user: UserRepository,
    role: RoleRepository,
    address: AddressRepository,
    refresh_token: RefreshTokenRepository,
    registration_token: RegistrationTokenRepository,
    validation_code: ValidationCodeRepository,
}

impl UnitOfWork {
    pub fn new(session: Arc<DbSession>) -> DbResult<Self> {
        Ok(Self {
            user: UserRepository::new(&session)?,
            role: RoleRepository::new(&session)?,
            address: AddressRepository::new(&session)?,
            refresh_token: RefreshTokenRepository::new(&session)?,
            registration_token: RegistrationTokenRepository::new(&session)?,
            validation_code: ValidationCodeRepository::new(&session)?,
            session,
        })
    }

    pub async fn connect(cfg: &DatabaseConfig) -> DbResult<Self> {
        let session = Arc::new(DbSession::connect(cfg).await?);
        Self::new(session)
    }

    pub fn session(&self) -> &Arc<DbSession> {
        &self.session
    }

    pub fn user(&self) -> &UserRepository {
        &self.user
    }

    pub fn role(&self) -> &RoleRepository {
        &self.role
    }

    pub fn address(&self) -> &AddressRepository {
        &self.address
    }

    pub fn refresh_token(&self) -> &RefreshTokenRepository {
        &self.refresh_token
    }

    pub fn registration_token(&self) -> &RegistrationTokenRepository {
        &self.registration_token
    }

    pub fn validation_code(&self) -> &ValidationCodeRepository {
        &self.validation_code
    }

    pub async fn begin_transaction(&self) -> DbResult<()> {
        self.session.begin_transaction().await
    }

    pub async fn commit(&self) -> DbResult<()> {
        self.session.commit().await
    }

    pub async fn rollback(&self) -> DbResult<()> {
        self.session.rollback().await
    }
}
