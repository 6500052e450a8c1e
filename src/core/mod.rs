pub mod config;
pub mod loader;
pub mod pairing;
pub mod report;
pub mod section_choice;
pub mod setup;
