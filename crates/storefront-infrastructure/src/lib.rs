pub mod config_service;
pub mod dto;
pub mod paths;
pub mod session_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::session_repository::KeyValueSessionRepository;
pub use crate::storage::{FileKeyValueStorage, MemoryKeyValueStorage};
