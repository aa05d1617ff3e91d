//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used in user-facing messages.
pub const APP_NAME: &str = "traincfg";

/// Placeholder token in `rundir_name` resolved to the next free index.
pub const AUTOINDEX_TOKEN: &str = "<autoindex>";

/// Default root directory under which run directories are created.
pub const DEFAULT_RUNS_ROOT: &str = "runs";

/// Number of entries a `target_shapes` list must carry.
pub const TARGET_SHAPES_LEN: usize = 4;

/// Momentum value bounds.
pub mod momentum {
    /// Minimum valid momentum.
    pub const MIN: f64 = 0.0;
    /// Maximum valid momentum.
    pub const MAX: f64 = 1.0;
}

/// Learning-rate step decay bounds. Gamma must stay in `(0, MAX]`;
/// a gamma above 1 would grow the learning rate each step.
pub mod lr_step_gamma {
    /// Maximum valid decay factor.
    pub const MAX: f64 = 1.0;
}
