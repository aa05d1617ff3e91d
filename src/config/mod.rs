//! Configuration loading and validation.

mod decode;
mod file;
mod overrides;
mod types;
mod validate;

pub use decode::Strictness;
pub use file::{
    load_config_file, load_config_file_with, load_config_str, save_config, to_toml_string,
};
pub use overrides::apply_overrides;
pub use types::{
    ChannelOrder, DatasetSettings, OptimizerKind, ResizeStrategy, RootConfig, TestConfig,
    TrainConfig,
};
pub use validate::validate_config;
