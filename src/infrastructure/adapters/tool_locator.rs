//! 외부 도구 준비 포트 구현 어댑터.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{ToolLocation, ToolLocator};
use crate::domain::credentials::EnvLookup;
use crate::domain::environment::ProcessEnv;
use crate::infrastructure::tooling::{Bootstrapper, user_venv_dir};

/// PATH와 가상환경에서 openstack을 찾고 필요하면 설치한다.
pub struct VenvToolLocator {
    bootstrapper: Bootstrapper,
}

impl VenvToolLocator {
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        Self {
            bootstrapper: Bootstrapper::new(user_venv_dir(env)),
        }
    }
}

impl ToolLocator for VenvToolLocator {
    fn ensure_available(&self, root: &Path, env: ProcessEnv) -> Result<ToolLocation> {
        self.bootstrapper.ensure_available(root, env)
    }
}
