// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the ingestion pipeline. Each variant names the stage
/// that failed so a caller can tell "could not read the document" from
/// "could not understand it" from "understood it but could not save it".
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Text extraction failed; carries the tool's diagnostic verbatim when
    /// pdftotext produced one.
    #[error("text extraction failed: {0}")]
    Extract(String),

    /// The reasoning service could not be reached, timed out, or returned a
    /// non-success status or an empty envelope.
    #[error("reasoning service failure: {0}")]
    Upstream(String),

    /// The reply could not be read at all. Malformed individual lines are
    /// tolerated and never raise this.
    #[error("empty reply from reasoning service")]
    EmptyReply,

    /// Persistence failed after a successful parse; nothing from the batch
    /// was durably recorded.
    #[error("store failure: {0}")]
    Store(#[from] rusqlite::Error),
}
