//! Common test utilities for linapse.
//!
//! - `cli`: runner for the `linapse` binary with fluent assertions
//! - `fixtures`: temporary device directories and profile buffers
#![allow(dead_code)]


use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
