pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over the key-value persistence backends the session mirrors
/// its state into. A missing key is the valid "no data yet" state, never an
/// error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
