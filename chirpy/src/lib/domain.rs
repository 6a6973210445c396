pub mod chirp;
pub mod user;
