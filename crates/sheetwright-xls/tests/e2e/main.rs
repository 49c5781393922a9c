//! E2E tests for the XLS writer: assemble BIFF streams, wrap them in a
//! container, and take the produced file apart again.

mod common;
mod writing;

// Re-export common utilities for use in submodules
pub use common::*;
