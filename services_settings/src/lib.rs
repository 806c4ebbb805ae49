//! # Settings Service
//!
//! Configuration for Terminal OS lives inside the virtual file system as
//! `key:value` text files:
//!
//! - `/system/config/color.conf`: named output colours as hex
//! - `/users/user/config/user.conf`: per-user preferences
//!
//! This crate parses those files and keeps the `color` program's help in
//! step with the configured colours.

pub mod config;
pub mod service;

pub use config::{Config, ConfigError, Rgb};
pub use service::ConfigService;
