// vespa-logfmt - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, chrono, regex.
// Must NOT depend on: platform, app, or touch the filesystem.

pub mod component;
pub mod filter;
pub mod format;
pub mod model;
pub mod parser;
pub mod toggle;
