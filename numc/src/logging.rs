/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Subscriber helpers for binaries and tests that want to see the engine's `tracing` events.
//!
//! The library only emits events: allocation and view creation at `trace`, buffer release
//! and allocation failures at `debug`. Nothing is printed unless a subscriber is installed.

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Install a global subscriber logging to `stdout` and respecting the `RUST_LOG`
/// environment variable (for example `RUST_LOG=numc=debug`).
///
/// If the environment variable is not set the "info" level is used.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_subscriber() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true))
        .init();
}

/// Install a subscriber for the current thread only, writing through the test harness so
/// output is captured per test.
///
/// The subscriber is removed when the returned guard is dropped.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).with_test_writer())
        .set_default()
}
