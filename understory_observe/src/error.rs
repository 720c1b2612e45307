// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by observation backends.

use crate::types::Primitive;

/// Errors surfaced by observation backends.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ObserveError {
    /// The host does not provide the primitive at all.
    #[error("{primitive} observation is not available in this host")]
    Unavailable {
        /// The missing primitive.
        primitive: Primitive,
    },
}
