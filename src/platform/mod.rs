// vespa-logfmt - platform/mod.rs
//
// Platform abstraction layer: configuration files and input sources.
// Dependencies: standard library, directories, toml.
// Must NOT depend on: app.

pub mod config;
pub mod follow;
pub mod fs;
