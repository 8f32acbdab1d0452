//! Error types with rich diagnostics using miette
//!
//! Import errors carry the offending file text so a host can print the
//! failing line with a label under the bad byte.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Import Errors
// ============================================================================

/// A scene file could not be loaded. The document is left untouched.
#[derive(Error, Diagnostic, Debug)]
pub enum ImportError {
    #[error("malformed scene file: {message}")]
    #[diagnostic(code(vecpaint::import::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("malformed scene file: expected an array of shapes, found {found}")]
    #[diagnostic(
        code(vecpaint::import::not_an_array),
        help("scene files are a JSON array with one object per shape")
    )]
    NotAnArray { found: &'static str },
}

impl ImportError {
    /// Build a syntax error from serde_json's line/column report
    pub(crate) fn syntax(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        ImportError::Syntax {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, 0)),
        }
    }
}

/// Convert a 1-based line and column into a byte offset, clamped to the input.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

// ============================================================================
// Export Errors
// ============================================================================

/// Saving a scene or its raster snapshot failed
#[derive(Error, Diagnostic, Debug)]
pub enum ExportError {
    #[error("failed to serialize scene: {0}")]
    #[diagnostic(code(vecpaint::export::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("failed to encode PNG: {message}")]
    #[diagnostic(code(vecpaint::export::encode))]
    Encode { message: String },

    #[error("canvas of {width}x{height} pixels cannot be allocated")]
    #[diagnostic(
        code(vecpaint::export::empty_canvas),
        help("both dimensions must be non-zero")
    )]
    EmptyCanvas { width: u32, height: u32 },
}
