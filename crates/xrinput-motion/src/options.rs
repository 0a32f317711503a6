use ahash::AHashMap;
use serde::Deserialize;

use crate::Result;

/// Per-controller tweaks supplied by the host, keyed by component id.
///
/// ```yaml
/// components:
///   xr-standard-touchpad:
///     invert_y: true
///   xr-standard-trigger:
///     press_unsupported: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerOptions {
    #[serde(default)]
    pub components: AHashMap<Box<str>, ComponentOptions>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentOptions {
    /// The hardware never reaches a full press; a value of 1 is not a press.
    #[serde(default)]
    pub press_unsupported: bool,
    #[serde(default)]
    pub invert_x: bool,
    #[serde(default)]
    pub invert_y: bool,
}

impl ControllerOptions {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn with_component(mut self, id: &str, options: ComponentOptions) -> Self {
        self.components.insert(id.into(), options);
        self
    }

    #[inline]
    pub fn component(&self, id: &str) -> ComponentOptions {
        self.components.get(id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotionError;

    #[test]
    fn parses_component_flags() {
        let yaml = r#"
components:
  xr-standard-touchpad:
    invert_y: true
  xr-standard-trigger:
    press_unsupported: true
"#;
        let options = ControllerOptions::from_yaml_str(yaml).expect("options");
        assert!(options.component("xr-standard-touchpad").invert_y);
        assert!(!options.component("xr-standard-touchpad").invert_x);
        assert!(options.component("xr-standard-trigger").press_unsupported);
        assert_eq!(options.component("menu"), ComponentOptions::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = "components:\n  menu:\n    deadzone: 0.2\n";
        assert!(matches!(
            ControllerOptions::from_yaml_str(yaml),
            Err(MotionError::Options(_))
        ));
    }

    #[test]
    fn empty_document_has_no_components() {
        let options = ControllerOptions::from_yaml_str("{}").expect("options");
        assert!(options.components.is_empty());
    }
}
