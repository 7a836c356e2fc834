//! 프로필/카탈로그별 `openstack server list` 리포트 생성 유스케이스.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::application::ports::{
    CommandRunner, ProcessEnvironment, ProfileStore, ReportWriter, Reporter, ToolLocator,
};
use crate::domain::command::ReportOptions;
use crate::domain::credentials::{CliOverrides, resolve_credentials};
use crate::domain::environment::{base_environment, compose};
use crate::domain::error::OsscError;
use crate::domain::profiles::{
    CATALOGS_KEY, CatalogEnv, PROFILES_KEY, ProfileEntry, ensure_structure, profile_entry,
};

const REPORT_FILE: &str = "report.txt";

/// 리포트 대상 한 건.
#[derive(Debug, Clone)]
struct ReportTask {
    profile: String,
    catalog: String,
    env: CatalogEnv,
    entry: ProfileEntry,
}

pub struct ReportUseCase<'a> {
    pub root: &'a Path,
    pub store: &'a dyn ProfileStore,
    pub environment: &'a dyn ProcessEnvironment,
    pub tool_locator: &'a dyn ToolLocator,
    pub runner: &'a dyn CommandRunner,
    pub writer: &'a dyn ReportWriter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ReportUseCase<'a> {
    /// 모든 대상에 리포트를 남기고, 처음 발생한 0이 아닌 코드를 반환한다.
    pub async fn execute(&self, options: ReportOptions) -> Result<i32> {
        let document = ensure_structure(self.store.load()?);
        let tasks = select_tasks(
            &document,
            options.profile.as_deref(),
            options.catalog.as_deref(),
        )?;

        let mut exit_code = 0;
        for task in tasks {
            let path = report_path(&options.out, &task.profile, &task.catalog);
            let code = self.run_task(&task, &options, &path).await?;
            self.reporter.status(
                "report",
                &format!("{}/{} -> {} (exit={code})", task.profile, task.catalog, path.display()),
            );
            if exit_code == 0 {
                exit_code = code;
            }
        }
        Ok(exit_code)
    }

    async fn run_task(
        &self,
        task: &ReportTask,
        options: &ReportOptions,
        path: &Path,
    ) -> Result<i32> {
        let credentials = resolve_credentials(
            &CliOverrides::default(),
            self.environment,
            &task.entry,
            Some(&task.env),
        );
        let base = base_environment(self.environment.vars(), &task.env);
        let env = match compose(base, &credentials) {
            Ok(env) => env,
            Err(OsscError::MissingCredentials { missing }) => {
                self.writer.write(
                    path,
                    &format!("[{}] Missing variables: {}\n", timestamp(), missing.join(", ")),
                )?;
                return Ok(2);
            }
            Err(err) => return Err(err.into()),
        };

        let located = match self.tool_locator.ensure_available(self.root, env) {
            Ok(located) => located,
            Err(err) => {
                tracing::warn!(error = %err, "tool bootstrap failed");
                self.writer.write(path, &format!("Bootstrap failed: {err}\n"))?;
                return Ok(127);
            }
        };
        let Some(executable) = located.executable else {
            self.writer.write(path, "OpenStack CLI not found.\n")?;
            return Ok(127);
        };

        let args: Vec<String> = ["server", "list", "-f", options.format.as_str()]
            .iter()
            .map(ToString::to_string)
            .collect();
        let output = self
            .runner
            .run_captured(&executable, &args, &located.env)
            .await?;

        let mut command = vec![executable.display().to_string()];
        command.extend(args.iter().cloned());
        let mut content = format!(
            "# Report: server list\n# Profile: {}\n# Catalog: {}\n# Format: {}\n# Time: {}\n# Command: {}\n\n",
            task.profile,
            task.catalog,
            options.format.as_str(),
            timestamp(),
            shell_words::join(&command)
        );
        content.push_str(&output.stdout);
        if output.status != 0 {
            content.push_str(&format!("\n[exit={}] stderr:\n{}", output.status, output.stderr));
        }
        self.writer.write(path, &content)?;
        Ok(output.status)
    }
}

fn timestamp() -> String {
    // chrono의 `Z` 접미사를 사용한 UTC ISO-8601
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 필터 조합에 따라 (프로필, 카탈로그) 대상을 고른다.
fn select_tasks(
    document: &Value,
    profile: Option<&str>,
    catalog: Option<&str>,
) -> Result<Vec<ReportTask>> {
    let profiles = document
        .get(PROFILES_KEY)
        .and_then(Value::as_object)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            OsscError::NotFound(
                "No profiles configured. Import RCs first via 'ossc config import-rc'."
                    .to_string(),
            )
        })?;

    let catalogs_of = |name: &str| -> Vec<(String, CatalogEnv)> {
        profiles
            .get(name)
            .and_then(|p| p.get(CATALOGS_KEY))
            .and_then(Value::as_object)
            .map(|catalogs| {
                catalogs
                    .iter()
                    .map(|(cat, env)| (cat.clone(), string_map(env)))
                    .collect()
            })
            .unwrap_or_default()
    };
    let task = |name: &str, cat: String, env: CatalogEnv| ReportTask {
        profile: name.to_string(),
        catalog: cat,
        env,
        entry: profile_entry(document, name),
    };

    let mut tasks = Vec::new();
    match (profile, catalog) {
        (Some(name), Some(cat)) => {
            if !profiles.contains_key(name) {
                return Err(OsscError::NotFound(format!("Profile not found: {name}")).into());
            }
            let Some((_, env)) = find_catalog(catalogs_of(name), cat) else {
                return Err(OsscError::NotFound(format!(
                    "Catalog not found in profile '{name}': {cat}"
                ))
                .into());
            };
            tasks.push(task(name, cat.to_string(), env));
        }
        (Some(name), None) => {
            if !profiles.contains_key(name) {
                return Err(OsscError::NotFound(format!("Profile not found: {name}")).into());
            }
            let catalogs = catalogs_of(name);
            if catalogs.is_empty() {
                return Err(OsscError::NotFound(format!(
                    "No catalogs configured for profile '{name}'."
                ))
                .into());
            }
            tasks.extend(catalogs.into_iter().map(|(cat, env)| task(name, cat, env)));
        }
        (None, Some(cat)) => {
            for name in profiles.keys().map(String::as_str) {
                if let Some((_, env)) = find_catalog(catalogs_of(name), cat) {
                    tasks.push(task(name, cat.to_string(), env));
                }
            }
            if tasks.is_empty() {
                return Err(
                    OsscError::NotFound(format!("Catalog not found in any profile: {cat}")).into(),
                );
            }
        }
        (None, None) => {
            for name in profiles.keys().map(String::as_str) {
                tasks.extend(catalogs_of(name).into_iter().map(|(cat, env)| task(name, cat, env)));
            }
        }
    }
    Ok(tasks)
}

/// 이름으로 지정한 카탈로그는 비어 있으면 없는 것으로 본다.
fn find_catalog(
    catalogs: Vec<(String, CatalogEnv)>,
    name: &str,
) -> Option<(String, CatalogEnv)> {
    catalogs
        .into_iter()
        .find(|(catalog, env)| catalog == name && !env.is_empty())
}

fn string_map(value: &Value) -> CatalogEnv {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// `<out>/<profile>/<catalog>/report.txt`
pub fn report_path(out: &Path, profile: &str, catalog: &str) -> PathBuf {
    out.join(profile).join(catalog).join(REPORT_FILE)
}
