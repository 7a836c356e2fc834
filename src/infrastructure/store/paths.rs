//! 저장소 경로 결정.

use std::path::PathBuf;

use crate::domain::credentials::EnvLookup;

pub const APP_DIR: &str = "ossc";
pub const STORE_FILE: &str = "profiles.json";

const CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

/// `$XDG_CONFIG_HOME/ossc/profiles.json`, 없으면 플랫폼 사용자 설정 디렉터리.
pub fn storage_path(env: &dyn EnvLookup) -> PathBuf {
    config_base(env).join(APP_DIR).join(STORE_FILE)
}

fn config_base(env: &dyn EnvLookup) -> PathBuf {
    if let Some(base) = env.get(CONFIG_HOME_ENV).filter(|v| !v.trim().is_empty()) {
        return PathBuf::from(base);
    }
    if let Some(base) = dirs::config_dir() {
        return base;
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .unwrap_or_else(|| PathBuf::from(".config"))
}
