pub mod api;
pub mod auth;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod relay;
pub mod server;
