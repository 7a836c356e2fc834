//! 프로필 저장소 포트 구현 어댑터.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;

use crate::application::ports::ProfileStore;
use crate::domain::credentials::EnvLookup;
use crate::infrastructure::store;

/// JSON 파일 기반 프로필 저장소.
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// 환경 변수로 기본 저장 경로를 정한다.
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        Self::at(store::storage_path(env))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self) -> Result<Value> {
        Ok(store::load_document(&self.path))
    }

    fn save(&self, patch: &Value) -> Result<PathBuf> {
        store::save_document(&self.path, patch)
    }
}
