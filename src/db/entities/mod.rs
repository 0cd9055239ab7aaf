use chrono::{DateTime, FixedOffset, Utc};

pub mod address;
pub mod refresh_token;
pub mod registration_token;
pub mod role;
pub mod user;
pub mod validation_code;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::address::Address;
    pub use super::refresh_token::RefreshToken;
    pub use super::registration_token::RegistrationToken;
    pub use super::role::Role;
    pub use super::user::User;
    pub use super::validation_code::ValidationCode;
}

/// Entity timestamps are recorded in a fixed UTC-3 civil offset
/// (Brazil/East equivalent), independent of the host timezone.
pub const RECORD_OFFSET_SECONDS: i32 = -3 * 3600;

pub fn record_offset() -> FixedOffset {
    FixedOffset::east_opt(RECORD_OFFSET_SECONDS).expect("UTC-3 is a valid fixed offset")
}

/// Creation instant for a new entity, in the record offset.
pub fn registration_timestamp() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&record_offset())
}
