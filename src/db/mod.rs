pub mod entities;
pub mod error;
pub mod metadata;
pub mod predicate;
pub mod query;
pub mod repo;
pub mod row;
pub mod schema;
pub mod session;
pub mod uow;

pub use error::{DbLayerError, DbResult};
pub use metadata::{Entity, EntityMeta, FieldMeta, SqlValue};
pub use predicate::{CompareOp, Predicate};
pub use repo::{
    AddressFilter, AddressRepository, EntityQueries, RefreshTokenRepository,
    RegistrationTokenRepository, RepositoryBase, RoleRepository, UserFilter, UserRepository,
    ValidationCodeRepository,
};
pub use session::DbSession;
pub use uow::UnitOfWork;
