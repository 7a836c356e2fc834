//! 외부 도구에 넘길 최종 프로세스 환경 조립.

use std::collections::BTreeMap;

use crate::domain::credentials::{OS_PASSWORD, OS_USERNAME, ResolvedCredentials};
use crate::domain::error::OsscError;
use crate::domain::rc::OS_PREFIX;

/// 인증 엔드포인트 변수.
pub const OS_AUTH_URL: &str = "OS_AUTH_URL";

/// 실행 전에 반드시 비어 있지 않아야 하는 변수(보고 순서 고정).
pub const REQUIRED_VARS: [&str; 3] = [OS_AUTH_URL, OS_USERNAME, OS_PASSWORD];

const MASK: &str = "***";

pub type ProcessEnv = BTreeMap<String, String>;

/// 상속 환경 위에 카탈로그(또는 RC) 환경을 덮어 기본 환경을 만든다.
pub fn base_environment(
    inherited: impl IntoIterator<Item = (String, String)>,
    source_env: &BTreeMap<String, String>,
) -> ProcessEnv {
    let mut env: ProcessEnv = inherited.into_iter().collect();
    env.extend(source_env.iter().map(|(k, v)| (k.clone(), v.clone())));
    env
}

/// 해석된 자격증명을 덮어쓰고 필수 변수를 검증한다.
pub fn compose(
    mut base: ProcessEnv,
    credentials: &ResolvedCredentials,
) -> Result<ProcessEnv, OsscError> {
    if let Some(username) = credentials.username().filter(|v| !v.is_empty()) {
        base.insert(OS_USERNAME.to_string(), username.to_string());
    }
    if let Some(password) = credentials.password().filter(|v| !v.is_empty()) {
        base.insert(OS_PASSWORD.to_string(), password.to_string());
    }

    let missing = missing_vars(&base);
    if !missing.is_empty() {
        return Err(OsscError::MissingCredentials { missing });
    }
    Ok(base)
}

/// 비어 있거나 없는 필수 변수 이름을 고정 순서로 돌려준다.
pub fn missing_vars(env: &ProcessEnv) -> Vec<String> {
    REQUIRED_VARS
        .iter()
        .filter(|key| env.get(**key).is_none_or(|v| v.is_empty()))
        .map(|key| key.to_string())
        .collect()
}

/// dry-run 출력용 `OS_*` 뷰(키 정렬, 비밀번호 마스킹).
pub fn masked_os_view(env: &ProcessEnv) -> Vec<(String, String)> {
    env.iter()
        .filter(|(key, _)| key.starts_with(OS_PREFIX))
        .map(|(key, value)| {
            let shown = if key == OS_PASSWORD { MASK } else { value.as_str() };
            (key.clone(), shown.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::Resolved;

    fn env_of(pairs: &[(&str, &str)]) -> ProcessEnv {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn creds(username: Option<&str>, password: Option<&str>) -> ResolvedCredentials {
        ResolvedCredentials {
            username: username.map(|v| Resolved {
                value: v.to_string(),
                source: "flag",
            }),
            password: password.map(|v| Resolved {
                value: v.to_string(),
                source: "flag",
            }),
        }
    }

    #[test]
    fn catalog_env_overrides_inherited_values() {
        let inherited = vec![
            ("PATH".to_string(), "/bin".to_string()),
            ("OS_AUTH_URL".to_string(), "old".to_string()),
        ];
        let base = base_environment(inherited, &env_of(&[("OS_AUTH_URL", "new")]));
        assert_eq!(base["OS_AUTH_URL"], "new");
        assert_eq!(base["PATH"], "/bin");
    }

    #[test]
    fn resolved_credentials_overlay_base() {
        let base = env_of(&[("OS_AUTH_URL", "u"), ("OS_USERNAME", "rc")]);
        let env = compose(base, &creds(Some("flag"), Some("pw"))).expect("complete");
        assert_eq!(env["OS_USERNAME"], "flag");
        assert_eq!(env["OS_PASSWORD"], "pw");
    }

    #[test]
    fn reports_exactly_the_missing_names_in_order() {
        let err = compose(env_of(&[("OS_USERNAME", "")]), &creds(None, None)).unwrap_err();
        match err {
            OsscError::MissingCredentials { missing } => {
                assert_eq!(missing, vec!["OS_AUTH_URL", "OS_USERNAME", "OS_PASSWORD"]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = compose(env_of(&[("OS_AUTH_URL", "u")]), &creds(Some("x"), None)).unwrap_err();
        match err {
            OsscError::MissingCredentials { missing } => assert_eq!(missing, vec!["OS_PASSWORD"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn masked_view_hides_password_and_sorts() {
        let env = env_of(&[
            ("OS_USERNAME", "user"),
            ("HOME", "/root"),
            ("OS_PASSWORD", "secret"),
            ("OS_AUTH_URL", "u"),
        ]);
        let view = masked_os_view(&env);
        let keys: Vec<&str> = view.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["OS_AUTH_URL", "OS_PASSWORD", "OS_USERNAME"]);
        assert!(view.iter().all(|(_, v)| v != "secret"));
        assert!(view.contains(&("OS_PASSWORD".to_string(), "***".to_string())));
    }
}
