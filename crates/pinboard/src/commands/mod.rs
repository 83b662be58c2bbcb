pub mod config;
pub mod fill;
pub mod jd;
pub mod notes;
pub mod profile;
