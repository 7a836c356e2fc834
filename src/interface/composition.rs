//! 애플리케이션 조립(composition root) 모듈.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::usecases::import_rc::ImportRcUseCase;
use crate::application::usecases::list_profiles::ListProfilesUseCase;
use crate::application::usecases::report::ReportUseCase;
use crate::application::usecases::run_command::RunCommandUseCase;
use crate::application::usecases::set_credential::SetCredentialUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, FsRcReader, FsReportWriter, JsonProfileStore, ProcessCommandRunner,
    SystemEnvironment, TerminalPrompter, VenvToolLocator,
};

/// RC 파일 트리 루트를 지정하는 환경 변수(기본값: 현재 디렉터리).
pub const ROOT_ENV: &str = "OSSC_ROOT";

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    root: PathBuf,
    environment: SystemEnvironment,
    store: JsonProfileStore,
    rc_reader: FsRcReader,
    prompter: TerminalPrompter,
    tool_locator: VenvToolLocator,
    runner: ProcessCommandRunner,
    writer: FsReportWriter,
    reporter: ConsoleReporter,
}

impl AppComposition {
    /// 프로세스 환경에서 루트/저장소/venv 위치를 정해 조립한다.
    pub fn from_env() -> Result<Self> {
        let root = match env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => env::current_dir().context("failed to determine current directory")?,
        };
        Ok(Self::with_root(root))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let environment = SystemEnvironment;
        Self {
            root,
            store: JsonProfileStore::from_env(&environment),
            tool_locator: VenvToolLocator::from_env(&environment),
            environment,
            rc_reader: FsRcReader,
            prompter: TerminalPrompter,
            runner: ProcessCommandRunner,
            writer: FsReportWriter,
            reporter: ConsoleReporter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 실행 모드 유스케이스를 생성한다.
    pub fn run_usecase(&self) -> RunCommandUseCase<'_> {
        RunCommandUseCase {
            root: &self.root,
            store: &self.store,
            rc_reader: &self.rc_reader,
            environment: &self.environment,
            prompter: &self.prompter,
            tool_locator: &self.tool_locator,
            runner: &self.runner,
            reporter: &self.reporter,
        }
    }

    pub fn import_rc_usecase(&self) -> ImportRcUseCase<'_> {
        ImportRcUseCase {
            root: &self.root,
            store: &self.store,
            rc_reader: &self.rc_reader,
            reporter: &self.reporter,
        }
    }

    pub fn list_profiles_usecase(&self) -> ListProfilesUseCase<'_> {
        ListProfilesUseCase {
            store: &self.store,
            reporter: &self.reporter,
        }
    }

    pub fn set_credential_usecase(&self) -> SetCredentialUseCase<'_> {
        SetCredentialUseCase {
            store: &self.store,
            prompter: &self.prompter,
            reporter: &self.reporter,
        }
    }

    /// 리포트 생성 유스케이스를 생성한다.
    pub fn report_usecase(&self) -> ReportUseCase<'_> {
        ReportUseCase {
            root: &self.root,
            store: &self.store,
            environment: &self.environment,
            tool_locator: &self.tool_locator,
            runner: &self.runner,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }
}
