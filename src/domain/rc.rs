//! 셸 스크립트 형태의 RC 파일에서 변수 할당을 추출한다.
//!
//! RC 파일은 실행하지 않고 텍스트로만 해석한다.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex_lite::Regex;

/// RC 파일 한 개를 파싱한 결과(변수명 -> 값).
pub type RcEnvironment = BTreeMap<String, String>;

/// 카탈로그로 가져올 때 유지하는 변수 접두사.
pub const OS_PREFIX: &str = "OS_";

static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$")
        .expect("assignment pattern is valid")
});

/// RC 텍스트를 변수 맵으로 변환한다.
/// 할당이 아닌 줄은 오류 없이 건너뛰고, 같은 이름은 마지막 할당이 이긴다.
pub fn parse_rc(text: &str) -> RcEnvironment {
    let mut env = RcEnvironment::new();
    for raw in text.lines() {
        if let Some((key, value)) = parse_line(raw) {
            env.insert(key, value);
        }
    }
    env
}

fn parse_line(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.starts_with("echo ") || line.starts_with("read ") {
        return None;
    }
    if line.starts_with("[[ ") && line.contains("]]") {
        return None;
    }

    let caps = ASSIGNMENT_RE.captures(line)?;
    let key = caps.get(1)?.as_str().to_string();
    let value = unquote(caps.get(2)?.as_str().trim());
    Some((key, value.to_string()))
}

/// 같은 종류의 따옴표 한 겹만 벗긴다.
fn unquote(value: &str) -> &str {
    if value.len() < 2 {
        return value;
    }
    for quote in ['\'', '"'] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// `OS_` 접두사 변수만 남긴다(카탈로그 저장용).
pub fn os_subset(env: &RcEnvironment) -> BTreeMap<String, String> {
    env.iter()
        .filter(|(key, _)| key.starts_with(OS_PREFIX))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// RC 파일 경로를 결정한다.
/// - override가 절대 경로면 그대로, 상대 경로면 root 기준
/// - override가 없으면 `<root>/<profile>/rc-<catalog>.sh`
pub fn rc_path(root: &Path, profile: &str, catalog: &str, override_path: Option<&str>) -> PathBuf {
    match override_path.filter(|p| !p.is_empty()) {
        Some(path) => {
            let candidate = Path::new(path);
            if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                root.join(candidate)
            }
        }
        None => root.join(profile).join(format!("rc-{catalog}.sh")),
    }
}

/// 배치 가져오기에서 파일명(`rc-<name>.sh`, `rc_<name>.sh`)으로 카탈로그 이름을 유추한다.
pub fn catalog_from_file_name(file_name: &str) -> Option<String> {
    static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)^rc[-_](.+)\.sh$").expect("rc file name pattern is valid")
    });
    FILE_NAME_RE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
