use entity_derive::{Entity, base_entity};
use serde::{Deserialize, Serialize};

#[base_entity]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Entity)]
#[entity(table = "roles")]
pub struct Role {
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            active: true,
            registration_date: super::registration_timestamp(),
            name: name.into(),
        }
    }
}
