//! Factory descriptors.
//!
//! The model, dataset, and optimizer implementations live in the trainer;
//! these descriptors only carry what the configuration layer needs to report
//! and cross-check.

/// Descriptor of a registered model factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    /// Human-readable description.
    pub description: String,
}

impl ModelSpec {
    /// Create a model descriptor.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Descriptor of a registered dataset factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Human-readable description.
    pub description: String,
}

impl DatasetSpec {
    /// Create a dataset descriptor.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Descriptor of a registered optimizer factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerSpec {
    /// Human-readable description.
    pub description: String,
    /// Whether the optimizer consumes the `momentum` hyperparameter.
    pub uses_momentum: bool,
    /// Whether weight decay is decoupled from the gradient update.
    pub decoupled_weight_decay: bool,
}

impl OptimizerSpec {
    /// Create an optimizer descriptor.
    pub fn new(
        description: impl Into<String>,
        uses_momentum: bool,
        decoupled_weight_decay: bool,
    ) -> Self {
        Self {
            description: description.into(),
            uses_momentum,
            decoupled_weight_decay,
        }
    }
}
