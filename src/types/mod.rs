// KyoBrowser shared type definitions
// Each submodule defines types used across the application.

pub mod bookmark;
pub mod command;
pub mod download;
pub mod errors;
pub mod find;
pub mod tab;
