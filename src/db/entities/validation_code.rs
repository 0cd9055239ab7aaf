use chrono::{DateTime, FixedOffset};
use entity_derive::{Entity, base_entity};
use serde::{Deserialize, Serialize};

use super::user::User;

#[base_entity]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Entity)]
#[entity(table = "validation_codes")]
pub struct ValidationCode {
    pub user_id: i64,
    pub code: String,
    pub expires: DateTime<FixedOffset>,
    #[entity(ignore)]
    pub user: Option<User>,
}

impl ValidationCode {
    pub fn new(user_id: i64, code: impl Into<String>, expires: DateTime<FixedOffset>) -> Self {
        Self {
            id: 0,
            active: true,
            registration_date: super::registration_timestamp(),
            user_id,
            code: code.into(),
            expires,
            user: None,
        }
    }
}
