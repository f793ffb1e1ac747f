// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Containment and decomposition relationships

use crate::EntityId;
use serde::{Deserialize, Serialize};

/// One IfcRelContainedInSpatialStructure edge
///
/// `relating` is `None` when the relationship's RelatingStructure is unset
/// or not a reference. `related` keeps the order of RelatedElements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainmentEdge {
    /// The relationship entity itself
    pub relationship: EntityId,
    /// RelatingStructure
    pub relating: Option<EntityId>,
    /// RelatedElements
    pub related: Vec<EntityId>,
}

/// Containment query interface
///
/// # Example
///
/// ```ignore
/// use ifc_fm_model::{ContainmentQuery, EntityId};
///
/// fn describe(containment: &dyn ContainmentQuery, element: EntityId) {
///     match containment.containing_structure(element) {
///         Some(structure) => println!("{element} is in {structure}"),
///         None => println!("{element} is not contained"),
///     }
/// }
/// ```
pub trait ContainmentQuery: Send + Sync {
    /// Every containment edge in file order
    fn edges(&self) -> &[ContainmentEdge];

    /// The structure an element is directly contained in
    ///
    /// When an element appears in several edges, the first one in file
    /// order wins.
    fn containing_structure(&self, element: EntityId) -> Option<EntityId>;

    /// The whole an element is a part of (IfcRelAggregates) or nested in
    /// (IfcRelNests), aggregation first
    fn decomposing_parent(&self, element: EntityId) -> Option<EntityId>;

    /// Elements directly contained in a structure, in edge order
    fn contained_elements(&self, structure: EntityId) -> Vec<EntityId> {
        self.edges()
            .iter()
            .filter(|edge| edge.relating == Some(structure))
            .flat_map(|edge| edge.related.iter().copied())
            .collect()
    }
}
