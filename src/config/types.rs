//! Configuration type definitions.
//!
//! The document is decoded by [`crate::config::decode`]; these types only
//! derive `Serialize` so a loaded config can be written back out. A
//! [`RootConfig`] is constructed once, never mutated afterwards, and is safe
//! to share across threads.

use serde::Serialize;
use std::path::PathBuf;

/// Complete training-run configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootConfig {
    /// Registry key of the model to train (e.g. `image_compression.baseline`).
    pub model_path: String,

    /// Training-split settings.
    pub train: TrainConfig,

    /// Test-split settings.
    pub test: TestConfig,
}

/// Settings for the training split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainConfig {
    /// Run-directory name template; may contain the `<autoindex>` token,
    /// which is kept raw here and resolved by [`crate::rundir`].
    pub rundir_name: String,

    /// Trade throughput for bit-exact reproducibility across runs.
    pub more_reproducible: bool,

    /// Enable mixed-precision training.
    pub mixed_precision: bool,

    /// Samples per training step.
    pub batch_size: u32,

    /// Data-loading worker count; 0 loads on the main thread.
    pub num_workers: u32,

    /// Optimizer to instantiate.
    pub optimizer: OptimizerKind,

    /// Optimizer momentum, in `[0, 1]`.
    pub momentum: f64,

    /// Weight decay, non-negative.
    pub weight_decay: f64,

    /// Initial learning rate, positive.
    pub learning_rate: f64,

    /// Number of training epochs.
    pub epochs: u32,

    /// Epochs between learning-rate step decays.
    pub lr_step_size: u32,

    /// Multiplicative decay factor, in `(0, 1]`.
    pub lr_step_gamma: f64,

    /// Epochs between checkpoints.
    pub checkpoint_frequency: u32,

    /// Epochs between in-training test passes.
    pub test_frequency: u32,

    /// Registry key of the dataset to load (e.g. `image_folder`).
    pub dataset_path: String,

    /// Dataset settings for this split.
    pub dataset: DatasetSettings,
}

/// Settings for the test split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestConfig {
    /// Samples per inference batch.
    pub batch_size: u32,

    /// Data-loading worker count; 0 loads on the main thread.
    pub num_workers: u32,

    /// Write reconstructed outputs alongside metrics.
    pub save_results: bool,

    /// Steps between log lines.
    pub log_frequency: u32,

    /// Registry key of the dataset to load.
    pub dataset_path: String,

    /// Dataset settings for this split. `target_shapes` is never present
    /// for the test split.
    pub dataset: DatasetSettings,
}

/// Dataset settings shared by both splits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSettings {
    /// Dataset root directory.
    pub root: PathBuf,

    /// File listing the samples of this split, relative to `root`.
    pub filelist: PathBuf,

    /// Glob pattern selecting image files under `root`.
    pub glob: String,

    /// Color channel order of decoded images.
    pub channel_order: ChannelOrder,

    /// Spatial dimensions the model is trained to produce. Required for the
    /// training split (exactly four positive integers), absent for test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_shapes: Option<Vec<u32>>,

    /// Policy for fitting inputs to the target dimensions.
    pub resize_strategy: ResizeStrategy,
}

/// Color channel order of decoded image tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red.
    Bgr,
}

impl ChannelOrder {
    /// Comma-separated list of valid values for error messages.
    pub const VALID: &'static str = "rgb, bgr";
}

impl std::fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb => write!(f, "rgb"),
            Self::Bgr => write!(f, "bgr"),
        }
    }
}

impl std::str::FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "bgr" => Ok(Self::Bgr),
            other => Err(format!("unknown channel order: {other}")),
        }
    }
}

/// Policy for fitting an input image to the target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeStrategy {
    /// Pad the image up to the target dimensions.
    Expand,
    /// Scale without preserving aspect ratio.
    Stretch,
    /// Center-crop down to the target dimensions.
    Crop,
    /// Leave the image as-is.
    None,
}

impl ResizeStrategy {
    /// Comma-separated list of valid values for error messages.
    pub const VALID: &'static str = "expand, stretch, crop, none";
}

impl std::fmt::Display for ResizeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expand => write!(f, "expand"),
            Self::Stretch => write!(f, "stretch"),
            Self::Crop => write!(f, "crop"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for ResizeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expand" => Ok(Self::Expand),
            "stretch" => Ok(Self::Stretch),
            "crop" => Ok(Self::Crop),
            "none" => Ok(Self::None),
            other => Err(format!("unknown resize strategy: {other}")),
        }
    }
}

/// Supported optimizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Stochastic gradient descent with momentum.
    Sgd,
    /// Adam.
    Adam,
    /// Adam with decoupled weight decay.
    AdamW,
}

impl OptimizerKind {
    /// Comma-separated list of valid values for error messages.
    pub const VALID: &'static str = "sgd, adam, adamw";

    /// Registry key for this optimizer.
    pub fn key(self) -> &'static str {
        match self {
            Self::Sgd => "sgd",
            Self::Adam => "adam",
            Self::AdamW => "adamw",
        }
    }
}

impl std::fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for OptimizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sgd" => Ok(Self::Sgd),
            "adam" => Ok(Self::Adam),
            "adamw" => Ok(Self::AdamW),
            other => Err(format!("unknown optimizer: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_kind_from_str() {
        assert_eq!("sgd".parse::<OptimizerKind>().ok(), Some(OptimizerKind::Sgd));
        assert_eq!(
            "AdamW".parse::<OptimizerKind>().ok(),
            Some(OptimizerKind::AdamW)
        );
        assert!("rmsprop".parse::<OptimizerKind>().is_err());
    }

    #[test]
    fn test_resize_strategy_from_str() {
        assert_eq!(
            "Expand".parse::<ResizeStrategy>().ok(),
            Some(ResizeStrategy::Expand)
        );
        assert_eq!(
            "none".parse::<ResizeStrategy>().ok(),
            Some(ResizeStrategy::None)
        );
        assert!("Unknown".parse::<ResizeStrategy>().is_err());
    }

    #[test]
    fn test_channel_order_display_round_trip() {
        for order in [ChannelOrder::Rgb, ChannelOrder::Bgr] {
            assert_eq!(order.to_string().parse::<ChannelOrder>().ok(), Some(order));
        }
    }
}
