// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EntityResolver trait implementation

use crate::scanner::{EntityIndex, EntityScanner};
use crate::tokenizer::parse_entity_at;
use ifc_fm_model::{DecodedEntity, EntityId, EntityResolver, IfcType, ParseError, Result};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe entity resolver over one in-memory document
///
/// Entities are decoded lazily on first access and cached.
pub struct ResolverImpl {
    /// Raw IFC content (owned for thread safety)
    content: String,
    /// Entity ID -> (start, end) byte offsets
    index: EntityIndex,
    /// Entity IDs in file order
    order: Vec<EntityId>,
    /// Decoded entity cache
    cache: RwLock<FxHashMap<u32, Arc<DecodedEntity>>>,
    /// Type -> entity IDs, each list in file order
    type_index: FxHashMap<IfcType, Vec<EntityId>>,
}

impl ResolverImpl {
    /// Scan the content once and build every index
    ///
    /// Fails when the content has no `DATA;` section.
    pub fn from_content(content: String) -> Result<Self> {
        let mut index = EntityIndex::default();
        let mut order = Vec::new();
        let mut type_index: FxHashMap<IfcType, Vec<EntityId>> = FxHashMap::default();

        {
            let mut scanner = EntityScanner::new(&content)
                .ok_or_else(|| ParseError::format("no DATA section"))?;
            while let Some((id, type_name, start, end)) = scanner.next_entity() {
                if index.contains_key(&id) {
                    log::warn!("Entity #{} defined more than once, keeping the first", id);
                    continue;
                }
                index.insert(id, (start, end));
                order.push(EntityId(id));
                type_index
                    .entry(IfcType::parse(type_name))
                    .or_default()
                    .push(EntityId(id));
            }
        }

        log::debug!(
            "Indexed {} entities across {} types",
            order.len(),
            type_index.len()
        );

        Ok(Self {
            content,
            index,
            order,
            cache: RwLock::new(FxHashMap::default()),
            type_index,
        })
    }

    /// Entity IDs of every entity whose declared type matches `pred`, in file order
    pub fn ids_where(&self, pred: impl Fn(&IfcType) -> bool) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .type_index
            .iter()
            .filter(|(ty, _)| pred(ty))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        // Numeric order is not file order; sort by byte offset instead
        ids.sort_by_key(|id| self.index.get(&id.0).map(|(start, _)| *start));
        ids
    }

    /// Decode and cache an entity
    fn decode_and_cache(&self, id: u32) -> Option<Arc<DecodedEntity>> {
        {
            let cache = self.cache.read().ok()?;
            if let Some(cached) = cache.get(&id) {
                return Some(Arc::clone(cached));
            }
        }

        let (start, end) = self.index.get(&id)?;

        let entity = match parse_entity_at(&self.content, *start, *end) {
            Ok(entity) => entity,
            Err(e) => {
                log::warn!("Failed to decode #{}: {}", id, e);
                return None;
            }
        };
        let arc = Arc::new(entity);

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(id, Arc::clone(&arc));
        }

        Some(arc)
    }
}

impl EntityResolver for ResolverImpl {
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>> {
        self.decode_and_cache(id.0)
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>> {
        self.type_index
            .get(ifc_type)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.type_index.get(ifc_type).map(|v| v.len()).unwrap_or(0)
    }

    fn all_ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    fn entity_count(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#10=IFCSENSOR('2O2Fr$t4X7Zf8NOew3FLOH',$,'T1',$,$,$,$,$,.TEMPERATURESENSOR.);
#2=IFCSPACE('2O2Fr$t4X7Zf8NOew3FLKI',$,'Kitchen',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#5=IFCSENSOR('2O2Fr$t4X7Zf8NOew3FLPQ',$,'T2',$,$,$,$,$,.CO2SENSOR.);
#7=IFCWALL('2O2Fr$t4X7Zf8NOew3FLAB',$,'Wall',$,$,$,$,$);
#8=IFCSENSOR(unterminated;
ENDSEC;
END-ISO-10303-21;
"#;

    fn resolver() -> ResolverImpl {
        ResolverImpl::from_content(TEST_IFC.to_string()).unwrap()
    }

    #[test]
    fn test_resolver_get() {
        let entity = resolver().get(EntityId(2)).unwrap();
        assert_eq!(entity.ifc_type, IfcType::IfcSpace);
        assert_eq!(entity.get_string(2), Some("Kitchen"));
    }

    #[test]
    fn test_entities_by_type_keep_file_order() {
        let sensors = resolver().entities_by_type(&IfcType::IfcSensor);
        let ids: Vec<_> = sensors.iter().map(|e| e.id).collect();
        // #8 does not decode and is skipped
        assert_eq!(ids, vec![EntityId(10), EntityId(5)]);
    }

    #[test]
    fn test_all_ids_in_file_order() {
        let ids = resolver().all_ids();
        assert_eq!(
            ids,
            vec![EntityId(10), EntityId(2), EntityId(5), EntityId(7), EntityId(8)]
        );
    }

    #[test]
    fn test_ids_where_sorts_by_position() {
        let ids = resolver().ids_where(IfcType::is_product);
        assert_eq!(
            ids,
            vec![EntityId(10), EntityId(2), EntityId(5), EntityId(7), EntityId(8)]
        );
    }

    #[test]
    fn test_missing_entity() {
        assert!(resolver().get(EntityId(99)).is_none());
    }

    #[test]
    fn test_no_data_section() {
        let err = ResolverImpl::from_content("HEADER;ENDSEC;".to_string()).err();
        assert!(matches!(err, Some(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_resolver_thread_safe() {
        use std::thread;

        let resolver = Arc::new(resolver());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || {
                    for id in [2, 5, 7, 10] {
                        assert!(resolver.get(EntityId(id)).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
