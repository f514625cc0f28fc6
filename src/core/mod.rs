//! Domain types, configuration and the remote-source seam

pub mod config;
pub mod models;
pub mod ports;
