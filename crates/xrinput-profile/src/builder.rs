use serde_json::Value;

use crate::document::{document_profile_id, AssetProfile, RegistryProfile};
use crate::merge::merge_profile;
use crate::profile::MergedProfile;
use crate::schema::{SchemaKind, SchemaValidator};
use crate::validate::{validate_profile, ProfileIndex};
use crate::{Result, Scope};

/// Runs the whole document pipeline: schema check, parse, merge, validate.
#[derive(Clone, Copy)]
pub struct ProfileBuilder<'a> {
    validator: &'a dyn SchemaValidator,
    index: Option<&'a dyn ProfileIndex>,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(validator: &'a dyn SchemaValidator) -> Self {
        Self {
            validator,
            index: None,
        }
    }

    /// Check fallback ids against `index` during validation.
    pub fn with_index(mut self, index: &'a dyn ProfileIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn build(&self, registry: &Value, asset: &Value) -> Result<MergedProfile> {
        self.check_schema(registry, SchemaKind::Registry)?;
        self.check_schema(asset, SchemaKind::Asset)?;

        let registry = RegistryProfile::from_value(registry)?;
        let asset = AssetProfile::from_value(asset)?;
        let profile = merge_profile(&registry, &asset)?;
        validate_profile(&profile, self.index)?;
        Ok(profile)
    }

    fn check_schema(&self, document: &Value, kind: SchemaKind) -> Result<()> {
        let scope = Scope::profile(document_profile_id(document).unwrap_or_default());
        self.validator.validate(document, kind).into_result(&scope)
    }
}
