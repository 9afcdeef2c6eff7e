//! Key-value storage backends.

mod atomic_file;
mod file_storage;
mod memory_storage;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use file_storage::FileKeyValueStorage;
pub use memory_storage::MemoryKeyValueStorage;
