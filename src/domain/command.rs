//! 실행 모드/하위 명령 옵션 값 객체.

use std::path::PathBuf;

use crate::domain::credentials::CliOverrides;

/// 기본 실행 모드(openstack 명령 전달) 옵션.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub profile: Option<String>,
    pub catalog: Option<String>,
    pub rc_file: Option<String>,
    pub overrides: CliOverrides,
    pub dry_run: bool,
    /// openstack에 그대로 넘길 인자(선행 `--`는 제거된 상태)
    pub command: Vec<String>,
}

/// `config import-rc` 옵션.
#[derive(Debug, Clone)]
pub struct ImportRcOptions {
    pub profile: String,
    pub catalog: Option<String>,
    pub rc_file: Option<String>,
    pub rc_dir: Option<PathBuf>,
}

/// `config set-cred` 옵션.
#[derive(Debug, Clone)]
pub struct SetCredOptions {
    pub profile: String,
    pub password: Option<String>,
}

/// `report` 출력 형식(openstack `-f` 값).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Csv,
    Json,
    #[default]
    Table,
    Value,
    Yaml,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Table => "table",
            Self::Value => "value",
            Self::Yaml => "yaml",
        }
    }
}

/// `report` 옵션.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub out: PathBuf,
    pub format: ReportFormat,
    pub profile: Option<String>,
    pub catalog: Option<String>,
}

/// 선행 `--` 하나를 제거한 전달 인자.
pub fn passthrough_args(raw: Vec<String>) -> Vec<String> {
    match raw.first().map(String::as_str) {
        Some("--") => raw.into_iter().skip(1).collect(),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_leading_double_dash() {
        let args = vec!["--".to_string(), "server".to_string(), "--".to_string()];
        assert_eq!(passthrough_args(args), vec!["server", "--"]);
        assert_eq!(passthrough_args(vec!["server".to_string()]), vec!["server"]);
        assert!(passthrough_args(Vec::new()).is_empty());
    }
}
