pub mod api;
pub mod client;
pub mod parse;
pub mod request;
pub mod runtime;

pub use client::ServiceClient;
