//! RC 파일을 사용자 설정(profiles.json)의 카탈로그로 가져오는 유스케이스.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::application::ports::{ProfileStore, RcReader, Reporter};
use crate::domain::command::ImportRcOptions;
use crate::domain::error::OsscError;
use crate::domain::profiles::set_catalog_env;
use crate::domain::rc::{catalog_from_file_name, os_subset, rc_path};

/// 카탈로그 이름을 파일명에서 못 찾았을 때 쓰는 변수.
const PROJECT_ID_VAR: &str = "OS_PROJECT_ID";

/// 배치 가져오기 집계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// 단일 파일(`--catalog`) 또는 디렉터리(`--rc-dir`) 가져오기.
pub struct ImportRcUseCase<'a> {
    pub root: &'a Path,
    pub store: &'a dyn ProfileStore,
    pub rc_reader: &'a dyn RcReader,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ImportRcUseCase<'a> {
    pub fn execute(&self, options: ImportRcOptions) -> Result<()> {
        if let Some(dir) = options.rc_dir.as_deref() {
            self.import_dir(&options.profile, dir)?;
            return Ok(());
        }

        let Some(catalog) = options.catalog.as_deref() else {
            return Err(OsscError::Usage(
                "--catalog is required for single-file import (use --rc-dir for batch mode)"
                    .to_string(),
            )
            .into());
        };

        let path = rc_path(self.root, &options.profile, catalog, options.rc_file.as_deref());
        let env = self.rc_reader.read(&path)?;

        let mut patch = json!({});
        set_catalog_env(&mut patch, &options.profile, catalog, &os_subset(&env));
        self.store.save(&patch)?;

        self.reporter.raw(&format!(
            "Imported {} into profile '{}', catalog '{}'.",
            path.display(),
            options.profile,
            catalog
        ));
        Ok(())
    }

    /// 디렉터리의 `*.sh`를 모두 가져온 뒤 한 번만 저장한다.
    pub fn import_dir(&self, profile: &str, dir: &Path) -> Result<BatchSummary> {
        let Some(scripts) = self.rc_reader.list_scripts(dir)? else {
            return Err(OsscError::Usage(format!("Not a directory: {}", dir.display())).into());
        };

        let mut summary = BatchSummary::default();
        let mut patch = json!({});

        for path in scripts {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let env = match self.rc_reader.read(&path) {
                Ok(env) => env,
                Err(err) => {
                    tracing::warn!(file = %path.display(), error = %err, "RC parse failed");
                    self.reporter
                        .raw(&format!("[skip] {file_name}: parse error: {err}"));
                    summary.errors += 1;
                    continue;
                }
            };

            let catalog = catalog_from_file_name(&file_name)
                .or_else(|| env.get(PROJECT_ID_VAR).filter(|v| !v.is_empty()).cloned());
            let Some(catalog) = catalog else {
                self.reporter.raw(&format!(
                    "[skip] {file_name}: cannot determine catalog name (no rc-* match and no {PROJECT_ID_VAR})"
                ));
                summary.skipped += 1;
                continue;
            };

            set_catalog_env(&mut patch, profile, &catalog, &os_subset(&env));
            self.reporter.raw(&format!(
                "Imported {} -> profile '{profile}', catalog '{catalog}'",
                path.display()
            ));
            summary.imported += 1;
        }

        self.store.save(&patch)?;
        self.reporter.raw(&format!(
            "Batch import summary: imported={}, skipped={}, errors={}",
            summary.imported, summary.skipped, summary.errors
        ));
        Ok(summary)
    }
}
