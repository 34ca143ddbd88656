#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod detail;
pub mod fetch;
pub mod listing;
pub mod logging;
pub mod pass;
pub mod schedule;
pub mod store;
