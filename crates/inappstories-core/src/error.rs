// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Inappstories module.

use thiserror::Error;

/// Top-level error type for all Inappstories operations.
#[derive(Debug, Error)]
pub enum InappstoriesError {
    // -- Native engine errors --
    #[error("native call failed: {0}")]
    NativeCall(String),

    // -- Bridge / event channel errors --
    #[error("event channel closed: host receiver was dropped")]
    EmitterClosed,

    #[error("no view registered with tag {0}")]
    ViewNotFound(crate::types::ViewTag),

    #[error("invalid color string: {0:?}")]
    InvalidColor(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, InappstoriesError>;
