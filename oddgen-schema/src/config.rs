//! Generator configuration.
//!
//! The configuration is loaded once from YAML and passed by reference to the
//! model builder, type resolver and code emitter.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Scalar configuration value.
///
/// Defaults may be written as YAML numbers or strings; both are emitted as
/// Rust expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// Boolean literal.
    Bool(bool),
    /// Expression or literal name.
    Str(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// Override for one attribute.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributeOverride {
    /// Target type name (`int`, `double`, `char`, `string`, or a type name).
    #[serde(rename = "type")]
    pub ty: Option<String>,
    /// Default value expression.
    pub default: Option<ScalarValue>,
}

/// Per-class attribute overrides, keyed by attribute name.
pub type ClassOverrides = BTreeMap<String, AttributeOverride>;

/// Per-module class overrides, keyed by class name.
pub type ModuleOverrides = BTreeMap<String, ClassOverrides>;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Overrides keyed by module, class and attribute.
    pub modules: BTreeMap<String, ModuleOverrides>,
    /// Default value expressions keyed by type name.
    pub defaults: BTreeMap<String, ScalarValue>,
    /// Types resolved normally but never emitted.
    pub excludes: Vec<String>,
    /// Types that track presence explicitly.
    pub alternates: Vec<String>,
    /// Schema type names mapped to target type names.
    pub mapped: BTreeMap<String, String>,
    /// Rust path under which the generated modules are mounted.
    pub namespace: String,
    /// Destination directory, recreated on every run.
    pub output_dir: PathBuf,
    /// Emit element types instead of the accessor module.
    pub elements: bool,
    /// Reduced schema used to emit the allow-list validator.
    pub basic_odd: Option<PathBuf>,
    /// Directory of hand-written modules copied into the output.
    pub addons_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            modules: BTreeMap::new(),
            defaults: BTreeMap::new(),
            excludes: Vec::new(),
            alternates: Vec::new(),
            mapped: BTreeMap::new(),
            namespace: "super".to_string(),
            output_dir: PathBuf::from("generated"),
            elements: false,
            basic_odd: None,
            addons_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a configuration from YAML.
    ///
    /// # Errors
    /// Returns `ConfigError` if the YAML is malformed or a value is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// Relative paths in the file resolve against the file's directory.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&yaml)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Checks values that deserialize but cannot be used.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::invalid("namespace", "must not be empty"));
        }
        if !self
            .namespace
            .split("::")
            .all(|segment| !segment.is_empty() && is_path_segment(segment))
        {
            return Err(ConfigError::invalid(
                "namespace",
                format!("'{}' is not a Rust module path", self.namespace),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("output_dir", "must not be empty"));
        }
        Ok(())
    }

    /// Resolves relative paths against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.output_dir);
        if let Some(path) = self.basic_odd.as_mut() {
            resolve(path);
        }
        if let Some(path) = self.addons_dir.as_mut() {
            resolve(path);
        }
    }

    /// Returns the override for an attribute, if any.
    #[must_use]
    pub fn attribute_override(
        &self,
        module: &str,
        class: &str,
        attribute: &str,
    ) -> Option<&AttributeOverride> {
        self.modules.get(module)?.get(class)?.get(attribute)
    }

    /// Returns true if a type is excluded from emission.
    ///
    /// Matches either the schema name or the formatted name.
    #[must_use]
    pub fn is_excluded(&self, name: &str, formatted: &str) -> bool {
        self.excludes.iter().any(|e| e == name || e == formatted)
    }

    /// Returns true if a type tracks presence explicitly.
    #[must_use]
    pub fn is_alternate(&self, name: &str, formatted: &str) -> bool {
        self.alternates.iter().any(|a| a == name || a == formatted)
    }

    /// Returns the configured default for a type.
    #[must_use]
    pub fn type_default(&self, name: &str, formatted: &str) -> Option<&ScalarValue> {
        self.defaults
            .get(formatted)
            .or_else(|| self.defaults.get(name))
    }
}

fn is_path_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
namespace: "crate::mei"
output_dir: out
elements: true
basic_odd: basic.xml
modules:
  shared:
    att.sized:
      size:
        type: int
        default: 0
defaults:
  data_BOOLEAN: BOOLEAN_false
excludes:
  - data.DURATION
alternates:
  - data_MEASUREMENTABS
mapped:
  data.COLOR: string
"#;

    #[test]
    fn test_parse_config() {
        let config = GeneratorConfig::from_yaml_str(CONFIG).expect("Failed to parse");
        assert_eq!(config.namespace, "crate::mei");
        assert!(config.elements);
        let size = config
            .attribute_override("shared", "att.sized", "size")
            .expect("override exists");
        assert_eq!(size.ty.as_deref(), Some("int"));
        assert_eq!(size.default, Some(ScalarValue::Int(0)));
        assert!(config.attribute_override("shared", "att.sized", "n").is_none());
        assert!(config.attribute_override("cmn", "att.sized", "size").is_none());
    }

    #[test]
    fn test_name_matching() {
        let config = GeneratorConfig::from_yaml_str(CONFIG).expect("Failed to parse");
        assert!(config.is_excluded("data.DURATION", "data_DURATION"));
        assert!(config.is_alternate("data.MEASUREMENTABS", "data_MEASUREMENTABS"));
        assert!(!config.is_alternate("data.BOOLEAN", "data_BOOLEAN"));
        assert_eq!(
            config
                .type_default("data.BOOLEAN", "data_BOOLEAN")
                .map(ToString::to_string),
            Some("BOOLEAN_false".to_string())
        );
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = GeneratorConfig::from_yaml_str("").expect("Failed to parse");
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.namespace, "super");
        assert!(!config.elements);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            GeneratorConfig::from_yaml_str("namespace: ''"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml_str("namespace: 'a b'"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml_str("elements: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.yml");
        std::fs::write(&path, CONFIG).expect("Failed to write config");

        let config = GeneratorConfig::load(&path).expect("Failed to load");
        assert_eq!(config.output_dir, dir.path().join("out"));
        assert_eq!(config.basic_odd, Some(dir.path().join("basic.xml")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load(Path::new("/nonexistent/config.yml"))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(ScalarValue::Float(0.0).to_string(), "0.0");
        assert_eq!(ScalarValue::Float(1.5).to_string(), "1.5");
        assert_eq!(ScalarValue::Int(-3).to_string(), "-3");
    }
}
