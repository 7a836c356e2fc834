//! RC 스크립트 파일 읽기.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::error::OsscError;
use crate::domain::rc::{RcEnvironment, parse_rc};

/// 파일을 읽어 파싱한다. UTF-8이 아닌 바이트는 대체 문자로 읽는다.
pub fn read_rc_file(path: &Path) -> Result<RcEnvironment> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(OsscError::RcNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read RC file {}", path.display()));
        }
    };

    let env = parse_rc(&String::from_utf8_lossy(&bytes));
    tracing::debug!(path = %path.display(), vars = env.len(), "RC file parsed");
    Ok(env)
}

/// 디렉터리의 `*.sh` 파일을 이름순으로 돌려준다. 디렉터리가 아니면 `None`.
pub fn list_rc_scripts(dir: &Path) -> Result<Option<Vec<PathBuf>>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list directory {}", dir.display()))?;

    let mut scripts = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list directory {}", dir.display()))?
            .path();
        let is_script = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sh"));
        if is_script && path.is_file() {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(Some(scripts))
}
