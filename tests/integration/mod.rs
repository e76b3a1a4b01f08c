//! Integration test suite for tldeps
//!
//! End-to-end tests against temporary TeX Live trees built with
//! [`tldeps::test_utils::TexmfFixture`].
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **common**: `tldeps` command builder isolated from the user's config
//! - **pipeline**: Library-level parse → index → resolve → report runs
//! - **resolve**: `tldeps resolve`
//! - **scan**: `tldeps scan`
//! - **tree**: `tldeps tree`

mod common;

mod pipeline;
mod resolve;
mod scan;
mod tree;
