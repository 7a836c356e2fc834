//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::credentials::EnvLookup;
use crate::domain::environment::ProcessEnv;
use crate::domain::rc::RcEnvironment;

/// 프로필 문서(profiles.json) 저장소 포트.
pub trait ProfileStore: Send + Sync {
    /// 없거나 깨진 파일은 빈 문서(`{}`)로 돌려준다.
    fn load(&self) -> Result<Value>;
    /// 디스크 내용 위에 deep-merge 후 기록하고 경로를 반환한다.
    fn save(&self, patch: &Value) -> Result<PathBuf>;
}

/// RC 파일 읽기 포트.
pub trait RcReader: Send + Sync {
    /// 파일이 없으면 `OsscError::RcNotFound`.
    fn read(&self, path: &Path) -> Result<RcEnvironment>;
    /// 디렉터리의 `*.sh` 파일을 이름순으로 나열한다. 디렉터리가 아니면 `None`.
    fn list_scripts(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>>;
}

/// 외부 도구 탐색/설치 결과.
#[derive(Debug, Clone)]
pub struct ToolLocation {
    pub env: ProcessEnv,
    pub executable: Option<PathBuf>,
}

/// 외부 도구(openstack) 준비 포트.
pub trait ToolLocator: Send + Sync {
    fn ensure_available(&self, root: &Path, env: ProcessEnv) -> Result<ToolLocation>;
}

/// 캡처 실행 결과.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// 외부 명령 실행 포트.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 표준 입출력을 상속해 실행하고 종료 코드를 반환한다.
    async fn run_inherited(&self, program: &Path, args: &[String], env: &ProcessEnv)
    -> Result<i32>;
    /// 출력을 캡처해 실행한다.
    async fn run_captured(
        &self,
        program: &Path,
        args: &[String],
        env: &ProcessEnv,
    ) -> Result<CapturedOutput>;
}

/// 대화형 자격증명 입력 포트.
pub trait CredentialPrompter: Send + Sync {
    fn is_interactive(&self) -> bool;
    /// 빈 입력은 `None`.
    fn prompt_username(&self, default: Option<&str>) -> Result<Option<String>>;
    /// 입력 숨김. 빈 입력은 `None`.
    fn prompt_password(&self) -> Result<Option<String>>;
}

/// 프로세스 환경 포트(조회 + 상속용 전체 목록).
pub trait ProcessEnvironment: EnvLookup + Send + Sync {
    fn vars(&self) -> Vec<(String, String)>;
}

/// 리포트 파일 기록 포트(상위 디렉터리 생성 포함).
pub trait ReportWriter: Send + Sync {
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
