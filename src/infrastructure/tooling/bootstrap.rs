//! openstack CLI 준비: PATH → 저장소 `.venv` → 사용자 venv → venv 생성 후 설치.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Result;

use crate::application::ports::ToolLocation;
use crate::domain::credentials::EnvLookup;
use crate::domain::environment::ProcessEnv;
use crate::domain::error::OsscError;

use super::lookup::find_executable;

const TOOL: &str = "openstack";
const PATH_VAR: &str = "PATH";
const REPO_VENV: &str = ".venv";
const REQUIREMENTS: &str = "requirements.txt";
const DEFAULT_PACKAGE: &str = "python-openstackclient>=6";

#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

/// 사용자 venv 위치: `XDG_DATA_HOME`, `XDG_CONFIG_HOME`, `~/.config` 순.
pub fn user_venv_dir(env: &dyn EnvLookup) -> PathBuf {
    let base = ["XDG_DATA_HOME", "XDG_CONFIG_HOME"]
        .iter()
        .find_map(|key| env.get(key).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("ossc").join("venv")
}

fn venv_bin_dir(venv: &Path) -> PathBuf {
    venv.join("bin")
}

/// openstack 실행 파일을 찾고, 없으면 사용자 venv에 설치한다.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    pub user_venv: PathBuf,
    /// venv 생성에 쓰는 인터프리터.
    pub python: String,
    /// 자식 env의 PATH 다음으로 확인할 프로세스 PATH.
    pub process_path: Option<OsString>,
}

impl Bootstrapper {
    pub fn new(user_venv: PathBuf) -> Self {
        Self {
            user_venv,
            python: "python3".to_string(),
            process_path: std::env::var_os(PATH_VAR),
        }
    }

    pub fn ensure_available(&self, root: &Path, env: ProcessEnv) -> Result<ToolLocation> {
        if let Some(exe) = self.on_path(&env) {
            tracing::debug!(path = %exe.display(), "openstack found on PATH");
            return Ok(found(env, exe));
        }

        let repo_bin = venv_bin_dir(&root.join(REPO_VENV));
        let candidate = repo_bin.join(TOOL);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using repository venv");
            return Ok(found(prepend_path(env, &repo_bin), candidate));
        }

        let user_bin = venv_bin_dir(&self.user_venv);
        let candidate = user_bin.join(TOOL);
        if !candidate.is_file() {
            self.install(root)?;
        }

        if candidate.is_file() {
            return Ok(found(prepend_path(env, &user_bin), candidate));
        }

        let executable = self.on_path(&env);
        if executable.is_none() {
            tracing::warn!(
                venv = %self.user_venv.display(),
                "openstack still unavailable after bootstrap"
            );
        }
        Ok(ToolLocation { env, executable })
    }

    fn on_path(&self, env: &ProcessEnv) -> Option<PathBuf> {
        env.get(PATH_VAR)
            .and_then(|path| find_executable(TOOL, Some(OsStr::new(path.as_str()))))
            .or_else(|| find_executable(TOOL, self.process_path.as_deref()))
    }

    fn install(&self, root: &Path) -> Result<()> {
        let venv = &self.user_venv;
        if !venv.join("pyvenv.cfg").is_file() {
            eprintln!("Creating virtualenv for OpenStack CLI at {}", venv.display());
            let status = Command::new(&self.python)
                .arg("-m")
                .arg("venv")
                .arg(venv)
                .stdout(Stdio::null())
                .status()
                .map_err(|err| {
                    OsscError::Bootstrap(format!("failed to run {} -m venv: {err}", self.python))
                })?;
            if !status.success() {
                return Err(OsscError::Bootstrap(format!(
                    "virtualenv creation at {} exited with {status}",
                    venv.display()
                ))
                .into());
            }
        }

        let python = venv_bin_dir(venv).join("python");
        let upgrade = ["install", "--upgrade", "pip", "setuptools", "wheel"];
        if !pip(&python, &upgrade) {
            return Ok(());
        }

        let requirements = root.join(REQUIREMENTS);
        if requirements.is_file() {
            let req = requirements.to_string_lossy();
            pip(&python, &["install", "-r", req.as_ref()]);
        } else {
            pip(&python, &["install", DEFAULT_PACKAGE]);
        }
        Ok(())
    }
}

/// pip 실패는 기록만 하고 진행한다.
fn pip(python: &Path, args: &[&str]) -> bool {
    let result = Command::new(python)
        .arg("-m")
        .arg("pip")
        .args(args)
        .stdout(Stdio::null())
        .status();
    match result {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::warn!(args = ?args, %status, "pip install failed");
            false
        }
        Err(err) => {
            tracing::warn!(args = ?args, error = %err, "failed to run pip");
            false
        }
    }
}

fn found(env: ProcessEnv, exe: PathBuf) -> ToolLocation {
    ToolLocation {
        env,
        executable: Some(exe),
    }
}

fn prepend_path(mut env: ProcessEnv, bin: &Path) -> ProcessEnv {
    let existing = env.get(PATH_VAR).cloned().unwrap_or_default();
    env.insert(
        PATH_VAR.to_string(),
        format!("{}{PATH_SEPARATOR}{existing}", bin.display()),
    );
    env
}
