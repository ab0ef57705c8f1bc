// @file: chart_history/src/core/mod.rs
// @description: Exports the protocol session core and its data structures.
// @author: LAS.

pub mod currency;
pub mod errors;
pub mod extractor;
pub mod frame;
pub mod interfaces;
pub mod models;
pub mod orchestrator;
pub mod session;
