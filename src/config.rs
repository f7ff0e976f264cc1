use crate::kind::{DeclaredType, DeclaredTypeError, ScalarKind};
use crate::registry::{BuiltinFilter, FilterConstructor, FilterRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid type '{value}': {source}")]
    UnknownType {
        value: String,
        #[source]
        source: DeclaredTypeError,
    },
    #[error("Filter '{filter}' cannot compare values of type '{declared}'")]
    IncompatibleFilter {
        filter: BuiltinFilter,
        declared: String,
    },
}

/// Changes applied on top of the built-in registrations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub register: Vec<Registration>,
    pub unregister: Vec<Unregistration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Declared type; a trailing `?` names the nullable form
    #[serde(rename = "type")]
    pub declared: String,
    pub method: String,
    pub filter: BuiltinFilter,
    /// Value kind compared by the filter, needed for custom types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScalarKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unregistration {
    #[serde(rename = "type")]
    pub declared: String,
    pub method: String,
}

fn parse_declared(value: &str) -> Result<DeclaredType, ConfigError> {
    value
        .parse::<DeclaredType>()
        .map_err(|source| ConfigError::UnknownType {
            value: value.to_string(),
            source,
        })
}

impl Registration {
    /// Resolve the declared type and the constructor this entry registers
    pub fn resolve(&self) -> Result<(DeclaredType, FilterConstructor), ConfigError> {
        let declared = parse_declared(&self.declared)?;
        let incompatible = || ConfigError::IncompatibleFilter {
            filter: self.filter,
            declared: self.declared.clone(),
        };

        let kind = self
            .kind
            .or_else(|| declared.scalar_kind())
            .ok_or_else(incompatible)?;
        let constructor = self.filter.constructor(kind).ok_or_else(incompatible)?;

        Ok((declared, constructor))
    }
}

impl RegistryConfig {
    pub fn is_empty(&self) -> bool {
        self.register.is_empty() && self.unregister.is_empty()
    }

    /// Apply unregistrations then registrations.
    ///
    /// Every entry is validated first, so a failing config leaves the
    /// registry untouched.
    pub fn apply(&self, registry: &mut FilterRegistry) -> Result<(), ConfigError> {
        let removals = self
            .unregister
            .iter()
            .map(|entry| -> Result<_, ConfigError> {
                Ok((parse_declared(&entry.declared)?, entry.method.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let additions = self
            .register
            .iter()
            .map(|entry| -> Result<_, ConfigError> {
                Ok((entry.resolve()?, entry.method.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (declared, method) in removals {
            registry.unregister(&declared, method);
        }
        for ((declared, constructor), method) in additions {
            registry.register(&declared, method, constructor);
        }

        Ok(())
    }

    /// The default registrations with this config applied
    pub fn build_registry(&self) -> Result<FilterRegistry, ConfigError> {
        let mut registry = FilterRegistry::new();
        self.apply(&mut registry)?;
        Ok(registry)
    }
}

pub fn parse_config(raw: &str) -> Result<RegistryConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn load_config(path: Option<&Path>) -> Result<RegistryConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<RegistryConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static RegistryConfig {
    static DEFAULT_CONFIG: LazyLock<RegistryConfig> = LazyLock::new(RegistryConfig::default);
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register_and_unregister_tables() {
        let config = parse_config(
            r#"
            [[register]]
            type = "i32?"
            method = "at-least"
            filter = "number"

            [[unregister]]
            type = "string"
            method = "ends-with"
            "#,
        )
        .unwrap();

        assert_eq!(config.register.len(), 1);
        assert_eq!(config.register[0].filter, BuiltinFilter::Number);
        assert_eq!(config.register[0].kind, None);
        assert_eq!(config.unregister[0].method, "ends-with");
    }

    #[test]
    fn test_kind_accepts_the_same_names_as_the_cli() {
        let config = parse_config(
            r#"
            [[register]]
            type = "Ratio"
            method = "equals"
            filter = "number"
            kind = "Double"

            [[register]]
            type = "Count"
            method = "equals"
            filter = "number"
            kind = "int"
            "#,
        )
        .unwrap();

        assert_eq!(config.register[0].kind, Some(ScalarKind::F64));
        assert_eq!(config.register[1].kind, Some(ScalarKind::I32));
        let unknown = concat!(
            "[[register]]\ntype = \"X\"\nmethod = \"m\"\n",
            "filter = \"number\"\nkind = \"huge\"\n",
        );
        assert!(parse_config(unknown).is_err());
    }

    #[test]
    fn test_custom_type_needs_kind() {
        let entry = Registration {
            declared: "Money".to_string(),
            method: "equals".to_string(),
            filter: BuiltinFilter::Number,
            kind: None,
        };
        assert!(matches!(
            entry.resolve(),
            Err(ConfigError::IncompatibleFilter { .. })
        ));

        let entry = Registration {
            kind: Some(ScalarKind::Decimal),
            ..entry
        };
        let (declared, constructor) = entry.resolve().unwrap();
        assert_eq!(declared, DeclaredType::named("Money"));
        assert_eq!(constructor.name(), "NumberFilter<decimal>");
    }

    #[test]
    fn test_failed_apply_leaves_registry_untouched() {
        let config = RegistryConfig {
            register: vec![Registration {
                declared: "bool".to_string(),
                method: "contains".to_string(),
                filter: BuiltinFilter::StringContains,
                kind: None,
            }],
            unregister: vec![Unregistration {
                declared: "string".to_string(),
                method: "contains".to_string(),
            }],
        };
        let mut registry = FilterRegistry::new();
        let before = registry.len();

        assert!(config.apply(&mut registry).is_err());
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_empty_type_is_rejected() {
        let config = RegistryConfig {
            unregister: vec![Unregistration {
                declared: " ? ".to_string(),
                method: "equals".to_string(),
            }],
            ..RegistryConfig::default()
        };

        let err = config.build_registry().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownType {
                source: DeclaredTypeError::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_default_config_is_empty() {
        assert!(default_config().is_empty());
        assert!(load_config(None).unwrap().is_empty());
    }
}
