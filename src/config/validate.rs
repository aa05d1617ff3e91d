//! Configuration validation.
//!
//! Domain checks over an already-decoded [`RootConfig`]. A config is either
//! fully valid or the first violation is returned; nothing is silently
//! defaulted or clamped.

use crate::config::types::{DatasetSettings, RootConfig};
use crate::constants::{TARGET_SHAPES_LEN, lr_step_gamma, momentum};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &RootConfig) -> Result<()> {
    validate_train(config)?;
    validate_test(config)?;
    Ok(())
}

fn validate_train(config: &RootConfig) -> Result<()> {
    let train = &config.train;

    positive(train.batch_size, "train.batch_size")?;
    positive(train.epochs, "train.epochs")?;
    positive(train.lr_step_size, "train.lr_step_size")?;
    positive(train.checkpoint_frequency, "train.checkpoint_frequency")?;
    positive(train.test_frequency, "train.test_frequency")?;

    if !(momentum::MIN..=momentum::MAX).contains(&train.momentum) {
        return Err(Error::Range {
            path: "train.momentum".to_string(),
            value: train.momentum.to_string(),
            allowed: "0.0 to 1.0 inclusive",
        });
    }

    // Written as negated comparisons so NaN fails too.
    if !(train.weight_decay >= 0.0 && train.weight_decay.is_finite()) {
        return Err(Error::Range {
            path: "train.weight_decay".to_string(),
            value: train.weight_decay.to_string(),
            allowed: "non-negative",
        });
    }

    if !(train.learning_rate > 0.0 && train.learning_rate.is_finite()) {
        return Err(Error::Range {
            path: "train.learning_rate".to_string(),
            value: train.learning_rate.to_string(),
            allowed: "greater than 0",
        });
    }

    if !(train.lr_step_gamma > 0.0 && train.lr_step_gamma <= lr_step_gamma::MAX) {
        return Err(Error::Range {
            path: "train.lr_step_gamma".to_string(),
            value: train.lr_step_gamma.to_string(),
            allowed: "greater than 0, at most 1.0",
        });
    }

    validate_dataset(&train.dataset, "train.dataset", true)?;
    Ok(())
}

fn validate_test(config: &RootConfig) -> Result<()> {
    let test = &config.test;

    positive(test.batch_size, "test.batch_size")?;
    positive(test.log_frequency, "test.log_frequency")?;

    validate_dataset(&test.dataset, "test.dataset", false)?;
    Ok(())
}

// target_shapes is required for the train split and absent for test.
fn validate_dataset(dataset: &DatasetSettings, path: &str, train_split: bool) -> Result<()> {
    match (&dataset.target_shapes, train_split) {
        (None, true) => {
            return Err(Error::MissingField {
                path: format!("{path}.target_shapes"),
            });
        }
        (Some(shapes), _) => {
            if shapes.len() != TARGET_SHAPES_LEN {
                return Err(Error::Range {
                    path: format!("{path}.target_shapes"),
                    value: format!("{} entries", shapes.len()),
                    allowed: "exactly 4 entries",
                });
            }
            for (idx, shape) in shapes.iter().enumerate() {
                if *shape == 0 {
                    return Err(Error::Range {
                        path: format!("{path}.target_shapes[{idx}]"),
                        value: "0".to_string(),
                        allowed: "a positive integer",
                    });
                }
            }
        }
        (None, false) => {}
    }
    Ok(())
}

fn positive(value: u32, path: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::Range {
            path: path.to_string(),
            value: "0".to_string(),
            allowed: "a positive integer",
        });
    }
    Ok(())
}
