pub mod config;
pub mod context;
pub mod error;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use context::*;
pub use error::*;
pub use types::*;
