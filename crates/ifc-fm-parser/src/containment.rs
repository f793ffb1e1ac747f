// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Containment index built from relationship entities

use ifc_fm_model::{ContainmentEdge, ContainmentQuery, EntityId, EntityResolver, IfcType};
use rustc_hash::FxHashMap;

/// Containment and decomposition lookups for one document
pub struct ContainmentIndex {
    /// IfcRelContainedInSpatialStructure edges in file order
    edges: Vec<ContainmentEdge>,
    /// Element -> first containing structure
    element_structure: FxHashMap<EntityId, EntityId>,
    /// Part -> whole, from IfcRelAggregates
    aggregates: FxHashMap<EntityId, EntityId>,
    /// Nested -> host, from IfcRelNests
    nests: FxHashMap<EntityId, EntityId>,
}

impl ContainmentIndex {
    /// Read every containment and decomposition relationship
    pub fn build(resolver: &dyn EntityResolver) -> Self {
        let mut index = Self::empty();

        // IFCRELCONTAINEDINSPATIALSTRUCTURE(GlobalId, OwnerHistory, Name, Description, RelatedElements, RelatingStructure)
        for rel in resolver.entities_by_type(&IfcType::IfcRelContainedInSpatialStructure) {
            let related = rel.get_refs(4).unwrap_or_default();
            let relating = rel.get_ref(5);

            if relating.is_none() {
                log::warn!("{} has no RelatingStructure", rel.id);
            }

            if let Some(structure) = relating {
                for element in &related {
                    index.element_structure.entry(*element).or_insert(structure);
                }
            }

            index.edges.push(ContainmentEdge {
                relationship: rel.id,
                relating,
                related,
            });
        }

        // IFCRELAGGREGATES / IFCRELNESTS(GlobalId, OwnerHistory, Name, Description, RelatingObject, RelatedObjects)
        for (ty, map) in [
            (IfcType::IfcRelAggregates, &mut index.aggregates),
            (IfcType::IfcRelNests, &mut index.nests),
        ] {
            for rel in resolver.entities_by_type(&ty) {
                let Some(whole) = rel.get_ref(4) else {
                    continue;
                };
                for part in rel.get_refs(5).unwrap_or_default() {
                    map.entry(part).or_insert(whole);
                }
            }
        }

        log::debug!(
            "Containment: {} edges, {} aggregated, {} nested",
            index.edges.len(),
            index.aggregates.len(),
            index.nests.len()
        );

        index
    }

    /// Index with no relationships
    fn empty() -> Self {
        Self {
            edges: Vec::new(),
            element_structure: FxHashMap::default(),
            aggregates: FxHashMap::default(),
            nests: FxHashMap::default(),
        }
    }
}

impl ContainmentQuery for ContainmentIndex {
    fn edges(&self) -> &[ContainmentEdge] {
        &self.edges
    }

    fn containing_structure(&self, element: EntityId) -> Option<EntityId> {
        self.element_structure.get(&element).copied()
    }

    fn decomposing_parent(&self, element: EntityId) -> Option<EntityId> {
        self.aggregates
            .get(&element)
            .or_else(|| self.nests.get(&element))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverImpl;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCBUILDINGSTOREY('0bVX2Xw$f4OAo2kDF2y7dK',$,'Level 1',$,$,$,$,$,.ELEMENT.,0.);
#2=IFCSPACE('1bVX2Xw$f4OAo2kDF2y7dK',$,'Office',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#3=IFCSPACE('2bVX2Xw$f4OAo2kDF2y7dK',$,'Lobby',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#4=IFCSENSOR('3bVX2Xw$f4OAo2kDF2y7dK',$,'T1',$,$,$,$,$,.TEMPERATURESENSOR.);
#5=IFCCONTROLLER('4bVX2Xw$f4OAo2kDF2y7dK',$,'C1',$,$,$,$,$,$);
#6=IFCSENSOR('5bVX2Xw$f4OAo2kDF2y7dK',$,'T2',$,$,$,$,$,.TEMPERATURESENSOR.);
#10=IFCRELCONTAINEDINSPATIALSTRUCTURE('6bVX2Xw$f4OAo2kDF2y7dK',$,$,$,(#4,#5),#2);
#11=IFCRELCONTAINEDINSPATIALSTRUCTURE('7bVX2Xw$f4OAo2kDF2y7dK',$,$,$,(#4),#3);
#12=IFCRELAGGREGATES('8bVX2Xw$f4OAo2kDF2y7dK',$,$,$,#1,(#2,#3));
#13=IFCRELNESTS('9bVX2Xw$f4OAo2kDF2y7dK',$,$,$,#5,(#6));
#14=IFCRELCONTAINEDINSPATIALSTRUCTURE('AbVX2Xw$f4OAo2kDF2y7dK',$,$,$,(#6),$);
ENDSEC;
END-ISO-10303-21;
"#;

    fn index() -> ContainmentIndex {
        let resolver = ResolverImpl::from_content(TEST_IFC.to_string()).unwrap();
        ContainmentIndex::build(&resolver)
    }

    #[test]
    fn test_edges_in_file_order() {
        let index = index();
        let edges = index.edges();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].relating, Some(EntityId(2)));
        assert_eq!(edges[0].related, vec![EntityId(4), EntityId(5)]);
        assert_eq!(edges[2].relating, None);
    }

    #[test]
    fn test_first_edge_wins() {
        assert_eq!(index().containing_structure(EntityId(4)), Some(EntityId(2)));
    }

    #[test]
    fn test_decomposing_parent() {
        let index = index();
        assert_eq!(index.decomposing_parent(EntityId(2)), Some(EntityId(1)));
        assert_eq!(index.decomposing_parent(EntityId(6)), Some(EntityId(5)));
        assert_eq!(index.decomposing_parent(EntityId(4)), None);
        assert_eq!(index.containing_structure(EntityId(6)), None);
    }

    #[test]
    fn test_contained_elements() {
        let index = index();
        assert_eq!(
            index.contained_elements(EntityId(2)),
            vec![EntityId(4), EntityId(5)]
        );
        assert_eq!(index.contained_elements(EntityId(3)), vec![EntityId(4)]);
    }
}
