//! 현재 프로세스 환경 변수 어댑터.

use std::env;

use crate::application::ports::ProcessEnvironment;
use crate::domain::credentials::EnvLookup;

pub struct SystemEnvironment;

impl EnvLookup for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ProcessEnvironment for SystemEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        // UTF-8이 아닌 항목은 상속 대상에서 제외된다.
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}
