use entity_derive::{Entity, base_entity};
use serde::{Deserialize, Serialize};

use super::user::User;

#[base_entity]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Entity)]
#[entity(table = "registration_tokens")]
pub struct RegistrationToken {
    pub user_id: i64,
    pub token: String,
    #[entity(ignore)]
    pub user: Option<User>,
}

impl RegistrationToken {
    pub fn new(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            id: 0,
            active: true,
            registration_date: super::registration_timestamp(),
            user_id,
            token: token.into(),
            user: None,
        }
    }
}
