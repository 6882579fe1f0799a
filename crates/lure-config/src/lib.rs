pub mod config;
pub mod loader;
pub mod validate;

pub use config::{
    Config, ConfigLayer, HeuristicsConfig, HeuristicsLayer, OutputConfig, OutputLayer, RuleConfig,
    ScanConfig, ScanLayer,
};
pub use loader::{load_config, load_layer, save_config};
pub use validate::validate_config;
