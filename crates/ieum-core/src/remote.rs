//! Remote predictor boundary.
//!
//! The model call is opaque to this subsystem: a request with the text
//! snapshot and cursor-relative context goes out, a possibly-failed
//! response comes back. No retry or backoff lives here; a failed
//! response simply yields no prediction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::PredictionContext;
use crate::error::Result;

/// Request payload for a remote prediction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    /// Full document text snapshot.
    pub text: String,
    /// Caret character offset.
    pub cursor_position: usize,
    /// Text before the caret.
    pub text_before_cursor: String,
    /// Paragraph containing the caret.
    pub current_paragraph: String,
}

impl PredictionRequest {
    /// Build a request from an extracted context.
    pub fn from_context(context: &PredictionContext) -> Self {
        Self {
            text: context.text.clone(),
            cursor_position: context.cursor_position,
            text_before_cursor: context.text_before_cursor.clone(),
            current_paragraph: context.current_paragraph.clone(),
        }
    }
}

/// Response payload from a remote prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Whether the remote call produced a usable continuation.
    pub success: bool,
    /// Suggested continuation text, when successful.
    #[serde(default)]
    pub content: Option<String>,
    /// Remote-side error description, when failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictionResponse {
    /// Successful response carrying a continuation.
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            error: None,
        }
    }

    /// Failed response with a description.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error.into()),
        }
    }

    /// Usable continuation text, if any.
    ///
    /// Empty content counts as no prediction.
    pub fn into_content(self) -> Option<String> {
        if !self.success {
            return None;
        }
        self.content.filter(|c| !c.is_empty())
    }
}

/// Boundary to the remote AI collaborator.
///
/// Implementations wrap whatever transport the host application uses;
/// the subsystem only cares about the request/response shape.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Request a continuation for the given context.
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse>;
}

// =============================================================================
// Tests
// =============================================================================
