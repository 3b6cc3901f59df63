pub mod snapshot;
pub mod time;

pub use snapshot::*;
pub use time::*;
