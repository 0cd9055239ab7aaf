use chrono::{DateTime, FixedOffset};
use entity_derive::{Entity, base_entity};
use serde::{Deserialize, Serialize};

use super::user::User;

#[base_entity]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Entity)]
#[entity(table = "refresh_tokens")]
pub struct RefreshToken {
    pub user_id: i64,
    pub token: String,
    pub expires: DateTime<FixedOffset>,
    pub created_by_ip: String,
    pub revoked: Option<DateTime<FixedOffset>>,
    pub revoked_by_ip: Option<String>,
    pub replaced_by_token: Option<String>,
    #[entity(ignore)]
    pub user: Option<User>,
}

impl RefreshToken {
    pub fn new(
        user_id: i64,
        token: impl Into<String>,
        expires: DateTime<FixedOffset>,
        created_by_ip: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            active: true,
            registration_date: super::registration_timestamp(),
            user_id,
            token: token.into(),
            expires,
            created_by_ip: created_by_ip.into(),
            revoked: None,
            revoked_by_ip: None,
            replaced_by_token: None,
            user: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<FixedOffset>) -> bool {
        now >= self.expires
    }

    /// Usable for refresh: neither revoked nor past its expiry.
    pub fn is_active(&self, now: DateTime<FixedOffset>) -> bool {
        self.revoked.is_none() && !self.is_expired(now)
    }
}
