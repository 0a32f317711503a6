use std::sync::Arc;

use ahash::AHashMap;
use serde_json::Value;

use crate::builder::ProfileBuilder;
use crate::document::document_profile_id;
use crate::profile::MergedProfile;
use crate::Result;

type CacheKey = (Box<str>, Box<str>);

/// Merged profiles keyed by their `(registry, asset)` profile id pair.
///
/// Only successful builds are stored.
#[derive(Debug, Default)]
pub struct ProfileCache {
    entries: AHashMap<CacheKey, Arc<MergedProfile>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, registry_id: &str, asset_id: &str) -> Option<Arc<MergedProfile>> {
        self.entries
            .get(&(Box::from(registry_id), Box::from(asset_id)))
            .cloned()
    }

    pub fn get_or_build(
        &mut self,
        builder: &ProfileBuilder<'_>,
        registry: &Value,
        asset: &Value,
    ) -> Result<Arc<MergedProfile>> {
        let key: CacheKey = (
            document_profile_id(registry).unwrap_or_default().into(),
            document_profile_id(asset).unwrap_or_default().into(),
        );
        if let Some(profile) = self.entries.get(&key) {
            log::debug!("profile cache hit for \"{}\"", key.0);
            return Ok(Arc::clone(profile));
        }

        log::debug!("profile cache miss for \"{}\"", key.0);
        let profile = Arc::new(builder.build(registry, asset)?);
        self.entries.insert(key, Arc::clone(&profile));
        Ok(profile)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;
    use crate::schema::{SchemaKind, SchemaReport};

    fn registry() -> Value {
        json!({
            "profileId": "generic-trigger",
            "layouts": {
                "none": {
                    "selectComponentId": "xr-standard-trigger",
                    "components": { "xr-standard-trigger": { "type": "trigger" } },
                    "gamepad": { "mapping": "xr-standard", "buttons": ["xr-standard-trigger"] }
                }
            }
        })
    }

    fn asset() -> Value {
        json!({
            "profileId": "generic-trigger",
            "overrides": { "none": { "assetPath": "none.glb" } }
        })
    }

    #[test]
    fn builds_each_pair_once() {
        let calls = Cell::new(0);
        let counting = |_: &Value, _: SchemaKind| {
            calls.set(calls.get() + 1);
            SchemaReport::valid()
        };
        let builder = ProfileBuilder::new(&counting);
        let mut cache = ProfileCache::new();

        let first = cache.get_or_build(&builder, &registry(), &asset()).expect("build");
        let second = cache.get_or_build(&builder, &registry(), &asset()).expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("generic-trigger", "generic-trigger").is_some());
    }

    #[test]
    fn failures_are_not_cached() {
        let builder = ProfileBuilder::new(&crate::schema::SkipSchemaValidation);
        let mut cache = ProfileCache::new();
        let broken = json!({ "profileId": "generic-trigger", "overrides": {} });

        assert!(cache.get_or_build(&builder, &registry(), &broken).is_err());
        assert!(cache.is_empty());

        cache.get_or_build(&builder, &registry(), &asset()).expect("build");
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
