//! PATH 기반 실행 파일 탐색.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// `path_var`(PATH 형식)를 순회해 실행 파일 경로를 찾는다.
pub fn find_executable(command: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if command.trim().is_empty() {
        return None;
    }

    // 경로가 주어지면 파일 존재만 검사한다.
    let command_path = Path::new(command);
    if command_path.components().count() > 1 {
        return command_path.is_file().then(|| command_path.to_path_buf());
    }

    let path_var = path_var?;

    #[cfg(windows)]
    {
        let has_ext = command_path.extension().is_some();
        let pathext = env::var_os("PATHEXT").unwrap_or_else(|| ".EXE;.CMD;.BAT;.COM".into());
        let exts: Vec<String> = pathext
            .to_string_lossy()
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        for dir in env::split_paths(path_var) {
            let candidate = dir.join(command);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !has_ext {
                for ext in &exts {
                    let candidate = dir.join(format!("{command}{ext}"));
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    #[cfg(not(windows))]
    {
        env::split_paths(path_var)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(command))
            .find(|candidate| candidate.is_file())
    }
}
