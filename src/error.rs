//! Error types for the replay dice extractor.
//!
//! This module defines the error hierarchy for everything that can go wrong
//! while opening replay archives, parsing replay documents, and decoding
//! packed dice payloads. Problems local to a single board action (missing
//! fields, unknown players) are not errors and never reach this type.

use thiserror::Error;

/// The main error type for replay parsing operations.
///
/// This enum covers all error cases that abort work on one document or one
/// archive:
/// - File I/O failures
/// - Zip container failures
/// - Unparsable XML
/// - Malformed packed dice payloads
///
/// # Example
///
/// ```
/// use bbrz_dice::error::{ParserError, Result};
///
/// fn example_operation() -> Result<()> {
///     Err(ParserError::MalformedDiceList {
///         payload: "(1,2".to_string(),
///         reason: "missing closing parenthesis".to_string(),
///     })
/// }
/// ```
#[derive(Error, Debug)]
pub enum ParserError {
    /// An I/O error occurred while reading an archive or an entry stream.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The `.bbrz` container could not be opened or an entry could not be
    /// decompressed.
    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    /// The replay document is not well-formed XML.
    #[error("XML error: {0}")]
    XmlError(#[from] roxmltree::Error),

    /// An archive entry is not valid UTF-8 text.
    #[error("Entry {entry} is not valid UTF-8")]
    InvalidEncoding {
        /// Name of the offending archive entry.
        entry: String,
    },

    /// A packed dice payload does not follow the `(a,b,...)` layout.
    ///
    /// Decoding never guesses; the whole document is rejected instead.
    #[error("Malformed dice list {payload:?}: {reason}")]
    MalformedDiceList {
        /// The raw payload text as found in the document.
        payload: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ParserError {
    /// Creates a `MalformedDiceList` error for the given payload.
    ///
    /// # Example
    ///
    /// ```
    /// use bbrz_dice::error::ParserError;
    ///
    /// let err = ParserError::malformed_dice("(1,2,3)", "odd token count 3");
    /// assert!(err.to_string().contains("odd token count"));
    /// ```
    #[must_use]
    pub fn malformed_dice(payload: &str, reason: impl Into<String>) -> Self {
        ParserError::MalformedDiceList {
            payload: payload.to_string(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for replay parsing operations.
pub type Result<T> = std::result::Result<T, ParserError>;
