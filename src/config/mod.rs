mod loader;
mod types;

pub use loader::{check_binary, default_config_path, load_config, resolve_config};
pub use types::*;
