//! profiles.json 읽기/쓰기.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::domain::profiles::{deep_merge, ensure_structure};

/// 파일을 읽어 JSON 문서를 돌려준다.
/// 파일이 없거나 JSON으로 읽을 수 없으면 빈 문서(`{}`)로 취급한다. 구조 정규화는 호출자 몫.
pub fn load_document(path: &Path) -> Value {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return empty_object(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read profile store");
            return empty_object();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) if value.is_object() => value,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "profile store is not a JSON object; ignoring");
            empty_object()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to parse profile store");
            empty_object()
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// 디스크 내용을 `profiles` 구조로 옮긴 뒤 `patch`를 deep-merge 해 원자적으로 기록한다.
pub fn save_document(path: &Path, patch: &Value) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let merged = deep_merge(ensure_structure(load_document(path)), patch.clone());
    let mut body = serde_json::to_string_pretty(&merged)
        .context("failed to serialize profile store")?;
    body.push('\n');

    let tmp = temp_path(path);
    fs::write(&tmp, body)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    restrict_permissions(&tmp)?;
    fs::rename(&tmp, path).with_context(|| {
        format!("failed to move {} into {}", tmp.display(), path.display())
    })?;

    tracing::debug!(path = %path.display(), "profile store saved");
    Ok(path.to_path_buf())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "profiles.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
