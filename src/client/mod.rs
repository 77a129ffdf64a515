// File: ./src/client/mod.rs
pub mod cert;
pub mod feed;
pub mod middleware;
pub mod redirect;

pub use crate::client::feed::FeedClient;
