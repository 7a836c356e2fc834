//! 리포트 파일 기록 어댑터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::ReportWriter;

pub struct FsReportWriter;

impl ReportWriter for FsReportWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("failed to write report {}", path.display()))
    }
}
