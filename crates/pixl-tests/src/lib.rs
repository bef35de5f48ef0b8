//! Integration tests for pixl crates.
//!
//! End-to-end scenarios that go through the edit controller, the worker
//! thread and PNG export together.
