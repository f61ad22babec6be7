// Library target for integration tests and criterion benchmarks. The binary
// entry point is main.rs; the terminal front end (app, event, ui) lives only
// there.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod session;
pub mod store;
