//! 기본 실행 모드: 프로필/카탈로그 환경을 적용해 openstack 명령을 전달한다.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Value, json};

use crate::application::ports::{
    CommandRunner, CredentialPrompter, ProcessEnvironment, ProfileStore, RcReader, Reporter,
    ToolLocator,
};
use crate::domain::command::RunOptions;
use crate::domain::credentials::{CliOverrides, OS_USERNAME, resolve_credentials};
use crate::domain::environment::{base_environment, compose, masked_os_view};
use crate::domain::error::OsscError;
use crate::domain::profiles::{
    CatalogEnv, deep_merge, ensure_structure, lookup_catalog_env, profile_entry,
    set_profile_field,
};
use crate::domain::rc::rc_path;

/// 외부 도구 기본 실행 파일 이름.
pub const TOOL_NAME: &str = "openstack";

/// 환경 출처 표시(카탈로그 설정에서 온 경우).
const CONFIG_SOURCE: &str = "[config]";

/// 자격증명 해석부터 하위 프로세스 실행까지 조율한다.
pub struct RunCommandUseCase<'a> {
    pub root: &'a Path,
    pub store: &'a dyn ProfileStore,
    pub rc_reader: &'a dyn RcReader,
    pub environment: &'a dyn ProcessEnvironment,
    pub prompter: &'a dyn CredentialPrompter,
    pub tool_locator: &'a dyn ToolLocator,
    pub runner: &'a dyn CommandRunner,
    pub reporter: &'a dyn Reporter,
}

impl<'a> RunCommandUseCase<'a> {
    /// 종료 코드를 반환한다. 필수 변수 누락/도구 부재는 `OsscError`로 전파한다.
    pub async fn execute(&self, options: RunOptions) -> Result<i32> {
        let (Some(profile), Some(catalog)) =
            (options.profile.as_deref(), options.catalog.as_deref())
        else {
            return Err(OsscError::Usage(
                "--profile and --catalog are required unless using 'config' or 'report'"
                    .to_string(),
            )
            .into());
        };

        let mut document = ensure_structure(self.store.load()?);

        let (source_env, rc_source) = match lookup_catalog_env(&document, profile, catalog) {
            Some(env) => (env, PathBuf::from(CONFIG_SOURCE)),
            None => {
                let path = rc_path(self.root, profile, catalog, options.rc_file.as_deref());
                (self.rc_reader.read(&path)?, path)
            }
        };
        tracing::debug!(
            profile,
            catalog,
            source = %rc_source.display(),
            "catalog environment selected"
        );

        self.first_time_setup(&mut document, profile, &options.overrides, &source_env)?;

        let entry = profile_entry(&document, profile);
        let credentials =
            resolve_credentials(&options.overrides, self.environment, &entry, Some(&source_env));
        tracing::debug!(
            username_source = credentials.username.as_ref().map(|r| r.source),
            password_source = credentials.password.as_ref().map(|r| r.source),
            "credentials resolved"
        );

        let base = base_environment(self.environment.vars(), &source_env);
        let env = compose(base, &credentials)?;

        let mut command = vec![TOOL_NAME.to_string()];
        command.extend(options.command.iter().cloned());

        if options.dry_run {
            self.reporter
                .raw(&format!("RC source: {}", rc_source.display()));
            self.reporter.raw("Resolved OS_* env:");
            for (key, value) in masked_os_view(&env) {
                self.reporter.raw(&format!("  {key}={value}"));
            }
            self.reporter
                .raw(&format!("Command: {}", shell_words::join(&command)));
            return Ok(0);
        }

        let located = self.tool_locator.ensure_available(self.root, env)?;
        let Some(executable) = located.executable else {
            return Err(OsscError::ToolUnavailable.into());
        };

        tracing::info!(executable = %executable.display(), "running external tool");
        self.runner
            .run_inherited(&executable, &options.command, &located.env)
            .await
    }

    /// TTY에서 사용자명/비밀번호를 해석할 수 없으면 입력받아 프로필에 저장한다.
    fn first_time_setup(
        &self,
        document: &mut Value,
        profile: &str,
        overrides: &CliOverrides,
        source_env: &CatalogEnv,
    ) -> Result<()> {
        let entry = profile_entry(document, profile);
        let resolved = resolve_credentials(overrides, self.environment, &entry, Some(source_env));
        let need_username = resolved.username.is_none();
        let need_password = resolved.password.is_none();
        if !(need_username || need_password) || !self.prompter.is_interactive() {
            return Ok(());
        }

        self.reporter
            .raw(&format!("First-time setup for profile '{profile}'."));

        let mut patch = json!({});
        if need_username {
            let suggested = source_env
                .get(OS_USERNAME)
                .filter(|v| !v.is_empty())
                .cloned()
                .or_else(|| entry.username.clone().filter(|v| !v.is_empty()));
            let username = self
                .prompter
                .prompt_username(suggested.as_deref())?
                .or(suggested);
            if let Some(username) = username {
                set_profile_field(&mut patch, profile, "username", &username);
            }
        }
        if need_password && let Some(password) = self.prompter.prompt_password()? {
            set_profile_field(&mut patch, profile, "password", &password);
        }

        if patch.as_object().is_some_and(|root| !root.is_empty()) {
            let path = self.store.save(&patch)?;
            tracing::info!(profile, path = %path.display(), "stored first-time credentials");
            *document = deep_merge(document.take(), patch);
        }
        Ok(())
    }
}
