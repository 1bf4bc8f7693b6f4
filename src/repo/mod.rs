mod records;

pub mod bug;
pub mod card;
pub mod meta;
pub mod revision;
pub mod snapshot;

pub use bug::*;
pub use card::*;
pub use meta::*;
pub use revision::*;
pub use snapshot::*;
