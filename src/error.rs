//! Defines error types used by this library.

use xml::common::TextPosition;
use xml::reader::Error as XmlError;

/// A request could not be executed.
///
/// This is either a lower-level error (for example, the HTTP request failed), or a problem with
/// the server (maybe it's not implementing XML-RPC correctly). If the server sends a valid
/// response, this error will not occur.
///
/// No request is ever retried: the first failure of the single in-flight call is what the caller
/// gets.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The endpoint URL could not be assembled from the configured base URL.
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Communication with the server failed before a response body could be decoded.
    ///
    /// Connection failures, timeouts, non-success HTTP statuses and unreadable streams all
    /// surface here, so a caller can tell "could not reach the server" apart from "the server
    /// replied with something we can't parse".
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response could not be decoded. This can happen when the server doesn't correctly
    /// implement the XML-RPC spec.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Describes possible errors that can occur when decoding a response.
///
/// The `Xml` variant covers bodies that are not well-formed XML at all; `InvalidValue` and
/// `UnexpectedXml` cover well-formed documents that are not valid XML-RPC (protocol errors).
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Error while parsing (malformed?) XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] XmlError),

    /// Could not parse the given CDATA as XML-RPC value.
    ///
    /// For example, `<value><int>AAA</int></value>` describes an invalid value.
    #[error("invalid value for type '{for_type}' at {position}: {found}")]
    InvalidValue {
        /// The type for which an invalid value was supplied (eg. `int` or `dateTime.iso8601`).
        for_type: &'static str,
        /// The value we encountered, as a string.
        found: String,
        /// The position of the invalid value inside the XML document.
        position: TextPosition,
    },

    /// Found an unexpected tag, attribute, etc.
    #[error("unexpected XML at {position} (expected {expected})")]
    UnexpectedXml {
        /// A short description of the kind of data that was expected.
        expected: String,
        /// The position of the unexpected data inside the XML document.
        position: TextPosition,
    },
}
