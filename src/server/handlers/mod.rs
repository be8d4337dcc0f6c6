pub mod auth;
pub mod locations;
pub mod rides;
