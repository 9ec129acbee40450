// vespa-logfmt - app/mod.rs
//
// Application layer: option assembly and stream orchestration.
// Wires core logic to platform input sources and output sinks.

pub mod options;
pub mod run;
pub mod stream;
