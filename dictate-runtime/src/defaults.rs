use std::path::PathBuf;

pub const APP_DIR: &str = "dictate";
pub const CONFIG_FILE: &str = "config.json";

/// `<config dir>/dictate/config.json`, or `None` on platforms without a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}
