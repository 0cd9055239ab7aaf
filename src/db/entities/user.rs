use entity_derive::{Entity, base_entity};
use serde::{Deserialize, Serialize};

use super::role::Role;

#[base_entity]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Entity)]
#[entity(table = "users")]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: i64,
    pub validated: bool,
    pub change_password: bool,
    /// Populated by the user+role join queries, never by generated SQL.
    #[entity(ignore)]
    pub role: Option<Role>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role_id: i64,
    ) -> Self {
        Self {
            id: 0,
            active: true,
            registration_date: super::registration_timestamp(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role_id,
            validated: false,
            change_password: false,
            role: None,
        }
    }
}
