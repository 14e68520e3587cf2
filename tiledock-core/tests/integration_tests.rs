//! Integration tests for `TileDock` core library
//!
//! This module contains integration tests that drive a `LayoutContainer`
//! through full gestures and persist layouts through the file store.

// Allow common test patterns that Clippy warns about
#![allow(clippy::redundant_clone)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::float_cmp)]

mod integration;
