// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for IFC loading
//!
//! These traits define the main abstractions the resolution pipeline works against.

use crate::{ContainmentQuery, EntityResolver, ModelMetadata, ProductCatalog, Result};
use std::sync::Arc;

/// Main parsing interface - entry point for loading IFC content
///
/// Every call produces a fresh, independent model. Nothing is written to
/// disk and nothing is shared between calls.
///
/// # Example
///
/// ```ignore
/// use ifc_fm_model::{IfcParser, IfcModel};
///
/// let parser: Box<dyn IfcParser> = get_parser();
/// let model = parser.parse_bytes(&downloaded)?;
/// println!("Schema: {}", model.metadata().schema_version);
/// ```
pub trait IfcParser: Send + Sync {
    /// Parse IFC content and return a model
    fn parse(&self, content: &str) -> Result<Arc<dyn IfcModel>>;

    /// Parse an in-memory document buffer
    ///
    /// STEP files are ASCII with their own escape sequences; stray non-UTF-8
    /// bytes are replaced rather than rejected.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn IfcModel>> {
        self.parse(&String::from_utf8_lossy(bytes))
    }
}

/// Core model interface - read-only access to one loaded IFC document
///
/// The model is `Send + Sync` but never mutated after load; each request
/// should own its own instance.
pub trait IfcModel: Send + Sync {
    /// Entity lookups and reference resolution
    fn resolver(&self) -> &dyn EntityResolver;

    /// Containment and decomposition edges
    fn containment(&self) -> &dyn ContainmentQuery;

    /// Typed product records
    fn products(&self) -> &dyn ProductCatalog;

    /// Get unit scale factor (file length units to metres)
    ///
    /// Common values:
    /// - 1.0 for metres
    /// - 0.001 for millimetres
    /// - 0.3048 for feet
    fn unit_scale(&self) -> f64;

    /// Get file metadata (schema identifier, originating system, etc.)
    fn metadata(&self) -> &ModelMetadata;
}
