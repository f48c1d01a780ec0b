// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod history;
pub mod log;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;
