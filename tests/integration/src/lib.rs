//! Integration test utilities for the chat server
//!
//! This crate provides helpers for running end-to-end tests against the
//! service layer backed by a fresh in-memory store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
