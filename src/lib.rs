//! KyoBrowser: a tabbed desktop browser shell with bookmarks, downloads and
//! find-in-page, built on the platform web engine.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod config;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
pub mod view;

#[cfg(feature = "gui")]
pub mod ui;
