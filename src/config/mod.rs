//! Configuration loaded from `.engagemap.toml`

mod core;
mod loader;
mod weights;

pub use self::core::EngagemapConfig;
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use weights::{
    default_alpha_parameter, default_global_weight, default_local_weight,
    default_median_interval_width, default_topology_weight, default_walktrap_steps,
    AlignmentConfig, CascadeConfig, GammaTable,
};
