pub use cli::{Command, Shell};
pub use error::{ErrorCode, KvError, Result};
pub use store::{KeyValueStore, DEFAULT_CAPACITY};

pub mod cli;
pub mod error;
mod store;
