// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced when constructing a navigator.

use understory_observe::ObserveError;

/// Errors surfaced when constructing a [`TableOfContents`](crate::TableOfContents).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TocError {
    /// A required observation primitive is missing, so the active target
    /// could never be tracked.
    #[error("table of contents cannot track the viewport: {0}")]
    Observe(#[from] ObserveError),
}
