pub mod firebase_auth;
pub mod google_maps;
