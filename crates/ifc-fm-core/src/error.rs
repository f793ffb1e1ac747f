// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the extraction pipeline

use ifc_fm_model::ParseError;
use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors surfaced by the extraction pipeline
///
/// A missing container is never an error; it is reported as `space: null`.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The header declares no schema identifier
    #[error("Model declares no schema identifier")]
    MissingSchema,

    /// The schema identifier belongs to no known generation
    #[error("Unrecognized schema identifier '{0}'")]
    UnrecognizedSchema(String),

    /// A selected sensor has no usable direct placement
    #[error("Sensor {guid} has no resolvable placement: {reason}")]
    UnresolvablePlacement { guid: String, reason: String },

    /// The document could not be loaded
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Output serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
