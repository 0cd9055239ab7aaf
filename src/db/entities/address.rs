use entity_derive::{Entity, base_entity};
use serde::{Deserialize, Serialize};

use super::user::User;

#[base_entity]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Entity)]
#[entity(table = "addresses")]
pub struct Address {
    pub user_id: i64,
    pub zip_code: String,
    pub street: String,
    pub district: String,
    pub locality: String,
    pub number: i64,
    pub complement: Option<String>,
    /// State abbreviation (UF).
    pub uf: String,
    #[entity(ignore)]
    pub user: Option<User>,
}

impl Address {
    pub fn new(
        user_id: i64,
        zip_code: impl Into<String>,
        street: impl Into<String>,
        district: impl Into<String>,
        locality: impl Into<String>,
        number: i64,
        uf: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            active: true,
            registration_date: super::registration_timestamp(),
            user_id,
            zip_code: zip_code.into(),
            street: street.into(),
            district: district.into(),
            locality: locality.into(),
            number,
            complement: None,
            uf: uf.into(),
            user: None,
        }
    }
}
