pub mod connection;
pub mod playset;
