// @file: chart_history/src/tests/mod.rs
// @description: Test suites for the protocol core, connectors and configuration.
// @author: LAS.

mod config_defaults;
mod frame_codec;
mod session_identity;
mod symbol_search;
