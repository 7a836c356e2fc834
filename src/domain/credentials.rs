//! 사용자명/비밀번호 우선순위 해석.
//!
//! 우선순위: CLI 플래그 > 프로세스 환경변수 > 저장된 프로필 > RC 파일.
//! 빈 문자열은 모든 단계에서 "없음"으로 취급한다.

use std::collections::{BTreeMap, HashMap};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::profiles::ProfileEntry;

/// 사용자명 전용 환경변수.
pub const USERNAME_ENV: &str = "OSS_USERNAME";
/// 비밀번호 전용 환경변수.
pub const PASSWORD_ENV: &str = "OSS_PASSWORD";
/// OpenStack 표준 사용자명 변수.
pub const OS_USERNAME: &str = "OS_USERNAME";
/// OpenStack 표준 비밀번호 변수(환경변수 3순위 겸 RC 값).
pub const OS_PASSWORD: &str = "OS_PASSWORD";

/// 환경변수 조회 능력. Resolver는 프로세스 환경을 직접 읽지 않는다.
pub trait EnvLookup {
    fn get(&self, key: &str) -> Option<String>;
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// CLI에서 명시한 자격증명.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// 해석된 값과 출처 라벨. 라벨만 로그에 남긴다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: &'static str,
}

/// 한 번의 실행 동안만 쓰이는 자격증명 쌍.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCredentials {
    pub username: Option<Resolved>,
    pub password: Option<Resolved>,
}

impl ResolvedCredentials {
    pub fn username(&self) -> Option<&str> {
        self.username.as_ref().map(|r| r.value.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|r| r.value.as_str())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToString::to_string)
}

fn resolved(value: String, source: &'static str) -> Resolved {
    Resolved { value, source }
}

/// base64 비밀번호를 해독한다. 실패는 오류가 아니라 `None`.
pub fn decode_password_b64(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// 비밀번호를 우선순위대로 해석한다.
pub fn resolve_password(
    cli: &CliOverrides,
    env: &dyn EnvLookup,
    profile: &ProfileEntry,
    rc_env: Option<&BTreeMap<String, String>>,
) -> Option<Resolved> {
    if let Some(v) = non_empty(cli.password.as_deref()) {
        return Some(resolved(v, "flag"));
    }
    if let Some(v) = non_empty(env.get(PASSWORD_ENV).as_deref()) {
        return Some(resolved(v, "env:OSS_PASSWORD"));
    }
    if let Some(v) = non_empty(env.get(OS_PASSWORD).as_deref()) {
        return Some(resolved(v, "env:OS_PASSWORD"));
    }
    if let Some(v) = non_empty(profile.password.as_deref()) {
        return Some(resolved(v, "profile"));
    }
    if let Some(v) = profile
        .password_b64
        .as_deref()
        .filter(|v| !v.is_empty())
        .and_then(decode_password_b64)
        .filter(|v| !v.is_empty())
    {
        return Some(resolved(v, "profile:b64"));
    }
    rc_env
        .and_then(|rc| non_empty(rc.get(OS_PASSWORD).map(String::as_str)))
        .map(|v| resolved(v, "rc"))
}

/// 사용자명을 우선순위대로 해석한다.
pub fn resolve_username(
    cli: &CliOverrides,
    env: &dyn EnvLookup,
    profile: &ProfileEntry,
    rc_env: Option<&BTreeMap<String, String>>,
) -> Option<Resolved> {
    if let Some(v) = non_empty(cli.username.as_deref()) {
        return Some(resolved(v, "flag"));
    }
    if let Some(v) = non_empty(env.get(USERNAME_ENV).as_deref()) {
        return Some(resolved(v, "env:OSS_USERNAME"));
    }
    if let Some(v) = non_empty(profile.username.as_deref()) {
        return Some(resolved(v, "profile"));
    }
    rc_env
        .and_then(|rc| non_empty(rc.get(OS_USERNAME).map(String::as_str)))
        .map(|v| resolved(v, "rc"))
}

/// 두 값을 한 번에 해석한다.
pub fn resolve_credentials(
    cli: &CliOverrides,
    env: &dyn EnvLookup,
    profile: &ProfileEntry,
    rc_env: Option<&BTreeMap<String, String>>,
) -> ResolvedCredentials {
    ResolvedCredentials {
        username: resolve_username(cli, env, profile, rc_env),
        password: resolve_password(cli, env, profile, rc_env),
    }
}
