use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xrinput_gamepad::InputSource;

use crate::validate::ProfileIndex;
use crate::{Result, Scope};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesListEntry {
    pub path: String,
    #[serde(default)]
    pub deprecated: bool,
}

/// Published index of profiles, keyed by profile id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfilesList(BTreeMap<String, ProfilesListEntry>);

impl ProfilesList {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn insert(&mut self, profile_id: impl Into<String>, entry: ProfilesListEntry) {
        self.0.insert(profile_id.into(), entry);
    }

    #[inline]
    pub fn get(&self, profile_id: &str) -> Option<&ProfilesListEntry> {
        self.0.get(profile_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ProfileIndex for ProfilesList {
    fn contains_profile(&self, profile_id: &str) -> bool {
        self.0.contains_key(profile_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMatch {
    pub profile_id: String,
    pub path: String,
    pub deprecated: bool,
}

impl ProfileMatch {
    /// Resolve an asset file name against the directory of the profile document.
    pub fn asset_path(&self, asset: &str) -> String {
        match self.path.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{asset}"),
            None => asset.to_string(),
        }
    }
}

/// Pick the first of the source's profile ids that the list knows,
/// falling back to `default_profile`.
pub fn match_profile(
    list: &ProfilesList,
    source: &InputSource,
    default_profile: Option<&str>,
) -> Result<ProfileMatch> {
    let found = source
        .profiles
        .iter()
        .find_map(|id| list.get(id).map(|entry| (&**id, entry)));

    let (profile_id, entry) = match found {
        Some(found) => found,
        None => {
            let scope = Scope::profile(default_profile.unwrap_or_default());
            let default = default_profile.ok_or_else(|| {
                scope.mismatch(format!(
                    "no listed profile matches {:?} and no default was given",
                    source.profiles
                ))
            })?;
            let entry = list.get(default).ok_or_else(|| {
                scope.mismatch("default profile is missing from the profiles list")
            })?;
            (default, entry)
        }
    };

    if entry.deprecated {
        log::warn!("profile \"{profile_id}\" is deprecated");
    }
    log::debug!("matched profile \"{profile_id}\" at {}", entry.path);
    Ok(ProfileMatch {
        profile_id: profile_id.to_string(),
        path: entry.path.clone(),
        deprecated: entry.deprecated,
    })
}
