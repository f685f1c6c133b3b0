pub mod context;
pub mod machine;
pub mod poller;
pub mod session;
pub mod traits;
