//! Explicit factory registries for dotted-reference config fields.
//!
//! `model_path`, `dataset_path`, and `optimizer` name factories that the
//! surrounding trainer resolves; this crate never performs dynamic module
//! lookup. Instead the known keys are registered up front and queried by
//! exact string match, so a typo fails loudly with the list of valid keys.

pub mod types;

pub use types::{DatasetSpec, ModelSpec, OptimizerSpec};

use crate::config::RootConfig;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A string-keyed registry of factory descriptors.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: &'static str,
    entries: BTreeMap<String, T>,
}

impl<T> Registry<T> {
    /// Create an empty registry; `kind` names it in error messages.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Register an entry. Registering the same key twice is an error.
    pub fn register(&mut self, key: impl Into<String>, entry: T) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateRegistryKey {
                kind: self.kind,
                key,
            });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Resolve a key, failing with the known-key list if absent.
    pub fn resolve(&self, key: &str) -> Result<&T> {
        self.entries.get(key).ok_or_else(|| Error::UnknownRegistryKey {
            kind: self.kind,
            key: key.to_string(),
            known: self.keys().collect::<Vec<_>>().join(", "),
        })
    }

    /// Whether a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registered entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The three registries a trainer populates at process start.
#[derive(Debug, Clone)]
pub struct Registries {
    /// Model factories by key.
    pub models: Registry<ModelSpec>,
    /// Dataset factories by key.
    pub datasets: Registry<DatasetSpec>,
    /// Optimizer factories by key.
    pub optimizers: Registry<OptimizerSpec>,
}

/// Registries seeded with the built-in factories.
pub fn builtin() -> Registries {
    // register() only fails on duplicate keys, which a literal list rules out.
    #[allow(clippy::unwrap_used)]
    fn seed<T, const N: usize>(kind: &'static str, entries: [(&str, T); N]) -> Registry<T> {
        let mut registry = Registry::new(kind);
        for (key, entry) in entries {
            registry.register(key, entry).unwrap();
        }
        registry
    }

    Registries {
        models: seed(
            "model",
            [(
                "image_compression.baseline",
                ModelSpec::new("Baseline image-compression autoencoder"),
            )],
        ),
        datasets: seed(
            "dataset",
            [(
                "image_folder",
                DatasetSpec::new("Images enumerated by a filelist under a root directory"),
            )],
        ),
        optimizers: seed(
            "optimizer",
            [
                ("sgd", OptimizerSpec::new("SGD with momentum", true, false)),
                ("adam", OptimizerSpec::new("Adam", false, false)),
                (
                    "adamw",
                    OptimizerSpec::new("Adam with decoupled weight decay", false, true),
                ),
            ],
        ),
    }
}

/// Check every dotted reference in a config against the registries.
pub fn validate_references(config: &RootConfig, registries: &Registries) -> Result<()> {
    registries.models.resolve(&config.model_path)?;
    registries.datasets.resolve(&config.train.dataset_path)?;
    registries.datasets.resolve(&config.test.dataset_path)?;
    registries.optimizers.resolve(config.train.optimizer.key())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::test_support::valid_config;

    #[test]
    fn test_resolve_unknown_key_lists_known_set() {
        let registries = builtin();
        let err = registries.models.resolve("models.typo").unwrap_err();
        match err {
            Error::UnknownRegistryKey { kind, key, known } => {
                assert_eq!(kind, "model");
                assert_eq!(key, "models.typo");
                assert!(known.contains("image_compression.baseline"));
            }
            other => panic!("expected UnknownRegistryKey, got {other}"),
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = Registry::new("model");
        registry.register("a", ModelSpec::new("first")).unwrap();
        let err = registry.register("a", ModelSpec::new("second")).unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistryKey { .. }));
    }

    #[test]
    fn test_builtin_covers_valid_config() {
        let registries = builtin();
        assert!(validate_references(&valid_config(), &registries).is_ok());
    }

    #[test]
    fn test_unknown_dataset_path_fails() {
        let registries = builtin();
        let mut config = valid_config();
        config.test.dataset_path = "lib.datasets.ImageFolder".to_string();
        let err = validate_references(&config, &registries).unwrap_err();
        assert!(matches!(err, Error::UnknownRegistryKey { kind: "dataset", .. }));
    }

    #[test]
    fn test_keys_are_sorted() {
        let registries = builtin();
        let keys: Vec<_> = registries.optimizers.keys().collect();
        assert_eq!(keys, vec!["adam", "adamw", "sgd"]);
    }
}
