// Core data models for bugboard
// Records as delivered by the collectors; the engine only reads them

pub mod bug;
pub mod card;
pub mod meta;

pub use bug::*;
pub use card::*;
pub use meta::*;
