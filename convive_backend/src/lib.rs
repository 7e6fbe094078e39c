//! Convive: REST backend for a small social network with posts, comments,
//! likes, and follower relationships.

pub mod api;
pub mod bootstrap;
pub mod comments;
pub mod config;
pub mod database;
pub mod error;
pub mod follows;
pub mod likes;
pub mod posts;
pub mod telemetry;
pub mod users;
pub mod utils;
