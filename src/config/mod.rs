/// Settings file and environment overrides
pub mod settings;

pub use settings::{AppConfig, load_app_configuration, load_config};
