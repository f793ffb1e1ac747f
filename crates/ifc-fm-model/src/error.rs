// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for IFC loading operations

use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading an IFC document
///
/// Individual entities that fail to decode are logged and skipped; only a
/// document that cannot be indexed at all is an error.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Invalid IFC file format
    #[error("Invalid IFC format: {0}")]
    InvalidFormat(String),
}

impl ParseError {
    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        ParseError::InvalidFormat(msg.into())
    }
}
