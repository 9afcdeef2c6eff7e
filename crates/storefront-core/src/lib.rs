pub mod config;
pub mod error;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::StorefrontError;
