pub mod config;
pub mod db;
pub mod logging;
pub mod test_helpers;

pub use entity_derive::{Entity, base_entity};
