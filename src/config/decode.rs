//! Document decoding.
//!
//! Walks a parsed TOML table and builds the typed configuration, reporting
//! every failure with the full dotted path of the offending key. Domain
//! checks (positivity, bounded ratios) live in [`crate::config::validate`];
//! this module only establishes shape and type.

use crate::config::types::{
    ChannelOrder, DatasetSettings, OptimizerKind, ResizeStrategy, RootConfig, TestConfig,
    TrainConfig,
};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use toml::Value;
use toml::value::Table;

/// How to treat keys outside the recognized schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Unknown keys are ignored (forward compatible).
    #[default]
    Lenient,
    /// Unknown keys fail validation.
    Strict,
}

const ROOT_KEYS: &[&str] = &["model_path", "train", "test"];

const TRAIN_KEYS: &[&str] = &[
    "rundir_name",
    "more_reproducible",
    "mixed_precision",
    "batch_size",
    "num_workers",
    "optimizer",
    "momentum",
    "weight_decay",
    "learning_rate",
    "epochs",
    "lr_step_size",
    "lr_step_gamma",
    "checkpoint_frequency",
    "test_frequency",
    "dataset_path",
    "dataset",
];

const TEST_KEYS: &[&str] = &[
    "batch_size",
    "num_workers",
    "save_results",
    "log_frequency",
    "dataset_path",
    "dataset",
];

const TRAIN_DATASET_KEYS: &[&str] = &[
    "root",
    "filelist",
    "glob",
    "channel_order",
    "target_shapes",
    "resize_strategy",
];

const TEST_DATASET_KEYS: &[&str] = &[
    "root",
    "filelist",
    "glob",
    "channel_order",
    "resize_strategy",
];

/// Decode a parsed document into a [`RootConfig`].
///
/// The result is shape- and type-correct but not yet domain-checked; callers
/// normally go through [`crate::config::load_config_str`] which also runs
/// [`crate::config::validate_config`].
pub fn decode_document(doc: &Table, strictness: Strictness) -> Result<RootConfig> {
    let root = Section {
        path: String::new(),
        table: doc,
    };
    root.check_unknown(ROOT_KEYS, strictness)?;

    let train = root.table("train")?;
    let test = root.table("test")?;

    Ok(RootConfig {
        model_path: root.string("model_path")?,
        train: decode_train(&train, strictness)?,
        test: decode_test(&test, strictness)?,
    })
}

fn decode_train(section: &Section<'_>, strictness: Strictness) -> Result<TrainConfig> {
    section.check_unknown(TRAIN_KEYS, strictness)?;
    let dataset = section.table("dataset")?;

    Ok(TrainConfig {
        rundir_name: section.string("rundir_name")?,
        more_reproducible: section.boolean("more_reproducible")?,
        mixed_precision: section.boolean("mixed_precision")?,
        batch_size: section.count("batch_size")?,
        num_workers: section.count("num_workers")?,
        optimizer: section.enumerated("optimizer", OptimizerKind::VALID)?,
        momentum: section.float("momentum")?,
        weight_decay: section.float("weight_decay")?,
        learning_rate: section.float("learning_rate")?,
        epochs: section.count("epochs")?,
        lr_step_size: section.count("lr_step_size")?,
        lr_step_gamma: section.float("lr_step_gamma")?,
        checkpoint_frequency: section.count("checkpoint_frequency")?,
        test_frequency: section.count("test_frequency")?,
        dataset_path: section.string("dataset_path")?,
        dataset: decode_dataset(&dataset, TRAIN_DATASET_KEYS, strictness)?,
    })
}

fn decode_test(section: &Section<'_>, strictness: Strictness) -> Result<TestConfig> {
    section.check_unknown(TEST_KEYS, strictness)?;
    let dataset = section.table("dataset")?;

    Ok(TestConfig {
        batch_size: section.count("batch_size")?,
        num_workers: section.count("num_workers")?,
        save_results: section.boolean("save_results")?,
        log_frequency: section.count("log_frequency")?,
        dataset_path: section.string("dataset_path")?,
        dataset: decode_dataset(&dataset, TEST_DATASET_KEYS, strictness)?,
    })
}

fn decode_dataset(
    section: &Section<'_>,
    known: &[&str],
    strictness: Strictness,
) -> Result<DatasetSettings> {
    section.check_unknown(known, strictness)?;

    let target_shapes = if known.contains(&"target_shapes") {
        Some(section.shape_list("target_shapes")?)
    } else {
        None
    };

    Ok(DatasetSettings {
        root: section.path_buf("root")?,
        filelist: section.path_buf("filelist")?,
        glob: section.string("glob")?,
        channel_order: section.enumerated("channel_order", ChannelOrder::VALID)?,
        target_shapes,
        resize_strategy: section.enumerated("resize_strategy", ResizeStrategy::VALID)?,
    })
}

/// Name of a TOML value's type, for `TypeMismatch` messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

/// One table of the document, with the dotted path leading to it.
struct Section<'a> {
    path: String,
    table: &'a Table,
}

impl<'a> Section<'a> {
    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.table.get(key).ok_or_else(|| Error::MissingField {
            path: self.field_path(key),
        })
    }

    fn check_unknown(&self, known: &[&str], strictness: Strictness) -> Result<()> {
        if strictness == Strictness::Lenient {
            return Ok(());
        }
        for key in self.table.keys() {
            if !known.contains(&key.as_str()) {
                return Err(Error::UnknownField {
                    path: self.field_path(key),
                });
            }
        }
        Ok(())
    }

    fn table(&self, key: &str) -> Result<Section<'a>> {
        let value = self.require(key)?;
        let Value::Table(table) = value else {
            return Err(Error::TypeMismatch {
                path: self.field_path(key),
                expected: "table",
                actual: type_name(value),
            });
        };
        Ok(Section {
            path: self.field_path(key),
            table,
        })
    }

    fn string(&self, key: &str) -> Result<String> {
        match self.require(key)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::TypeMismatch {
                path: self.field_path(key),
                expected: "string",
                actual: type_name(other),
            }),
        }
    }

    fn path_buf(&self, key: &str) -> Result<PathBuf> {
        self.string(key).map(PathBuf::from)
    }

    fn boolean(&self, key: &str) -> Result<bool> {
        match self.require(key)? {
            Value::Boolean(b) => Ok(*b),
            other => Err(Error::TypeMismatch {
                path: self.field_path(key),
                expected: "boolean",
                actual: type_name(other),
            }),
        }
    }

    fn count(&self, key: &str) -> Result<u32> {
        match self.require(key)? {
            Value::Integer(i) => {
                u32::try_from(*i).map_err(|_| Error::Range {
                    path: self.field_path(key),
                    value: i.to_string(),
                    allowed: "a non-negative 32-bit integer",
                })
            }
            other => Err(Error::TypeMismatch {
                path: self.field_path(key),
                expected: "integer",
                actual: type_name(other),
            }),
        }
    }

    // Integer tokens widen to f64 so `weight_decay = 0` is accepted. TOML
    // also admits `nan` and `inf` literals, which no hyperparameter domain
    // includes, so non-finite values fail here.
    #[allow(clippy::cast_precision_loss)]
    fn float(&self, key: &str) -> Result<f64> {
        let value = match self.require(key)? {
            Value::Float(f) => *f,
            Value::Integer(i) => *i as f64,
            other => {
                return Err(Error::TypeMismatch {
                    path: self.field_path(key),
                    expected: "float",
                    actual: type_name(other),
                });
            }
        };
        if !value.is_finite() {
            return Err(Error::Range {
                path: self.field_path(key),
                value: value.to_string(),
                allowed: "a finite number",
            });
        }
        Ok(value)
    }

    fn enumerated<T: FromStr>(&self, key: &str, valid: &'static str) -> Result<T> {
        let raw = self.string(key)?;
        raw.parse().map_err(|_| Error::UnknownEnumValue {
            path: self.field_path(key),
            value: raw,
            valid: valid.to_string(),
        })
    }

    fn shape_list(&self, key: &str) -> Result<Vec<u32>> {
        let value = self.require(key)?;
        let Value::Array(items) = value else {
            return Err(Error::TypeMismatch {
                path: self.field_path(key),
                expected: "array",
                actual: type_name(value),
            });
        };
        let mut shapes = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match item {
                Value::Integer(i) => shapes.push(u32::try_from(*i).map_err(|_| Error::Range {
                    path: format!("{}[{idx}]", self.field_path(key)),
                    value: i.to_string(),
                    allowed: "a non-negative 32-bit integer",
                })?),
                other => {
                    return Err(Error::TypeMismatch {
                        path: format!("{}[{idx}]", self.field_path(key)),
                        expected: "integer",
                        actual: type_name(other),
                    });
                }
            }
        }
        Ok(shapes)
    }
}
