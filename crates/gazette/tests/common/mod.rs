//! Shared test utilities for gazette integration tests.
//!
//! This module provides:
//! - Deterministic stand-ins for language detection and text recognition
//! - `TestHarness` for running whole batches against a temp directory

pub mod fakes;
pub mod harness;

pub use fakes::*;
pub use harness::TestHarness;
