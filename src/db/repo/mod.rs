pub mod address_repo;
pub mod base;
pub mod refresh_token_repo;
pub mod registration_token_repo;
pub mod role_repo;
pub mod user_repo;
pub mod validation_code_repo;

pub use address_repo::{AddressFilter, AddressRepository};
pub use base::{EntityQueries, RepositoryBase};
pub use refresh_token_repo::RefreshTokenRepository;
pub use registration_token_repo::RegistrationTokenRepository;
pub use role_repo::RoleRepository;
pub use user_repo::{UserFilter, UserRepository};
pub use validation_code_repo::ValidationCodeRepository;
