// @file: chart_history/src/utils/mod.rs
// @description: Configuration loading.
// @author: LAS.

pub mod config;
