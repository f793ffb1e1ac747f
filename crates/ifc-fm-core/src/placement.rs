// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Direct placement of sensors

use crate::error::{ExtractError, Result};
use ifc_fm_model::{Location, PlacementSlot, Product};

/// Location stored in a product's direct placement, in file units
///
/// Components are returned verbatim; no parent placement is applied.
pub fn extract_location(product: &Product) -> Result<Location> {
    match &product.placement {
        PlacementSlot::Resolved(location) => Ok(*location),
        unresolved => Err(ExtractError::UnresolvablePlacement {
            guid: product.guid.clone(),
            reason: unresolved.to_string(),
        }),
    }
}
