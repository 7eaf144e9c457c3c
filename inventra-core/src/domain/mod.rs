//! Domain entities and value objects

pub mod classification;
pub mod identity;

pub use classification::ContentClass;
pub use identity::{IdentityRecord, ProductLabels, UNKNOWN};
