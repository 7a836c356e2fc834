//! RC 파일 읽기 포트 구현 어댑터.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::RcReader;
use crate::domain::rc::RcEnvironment;
use crate::infrastructure::rc_files;

pub struct FsRcReader;

impl RcReader for FsRcReader {
    fn read(&self, path: &Path) -> Result<RcEnvironment> {
        rc_files::read_rc_file(path)
    }

    fn list_scripts(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        rc_files::list_rc_scripts(dir)
    }
}
