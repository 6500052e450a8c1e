//! Fiasco Engine: playset parsing and connection generation for tabletop
//! relationship setups.
//!
//! A playset document is loaded into a tree of sections, categories and
//! items; a `Setup` then pairs up the people at the table and draws a
//! relationship and a detail for every pair.

pub mod core;
pub mod schema;

pub use crate::core::loader::{load_from_file, parse_str, LoadError};
pub use crate::core::pairing::PairingStrategy;
pub use crate::core::section_choice::SectionChoice;
pub use crate::core::setup::{Setup, SetupError};
pub use crate::schema::connection::Connection;
pub use crate::schema::playset::Playset;
