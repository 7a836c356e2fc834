//! 명령 실행 포트 구현 어댑터.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{CapturedOutput, CommandRunner};
use crate::domain::environment::ProcessEnv;
use crate::infrastructure::process;

/// 로컬 프로세스 실행 어댑터.
pub struct ProcessCommandRunner;

#[async_trait]
impl CommandRunner for ProcessCommandRunner {
    async fn run_inherited(
        &self,
        program: &Path,
        args: &[String],
        env: &ProcessEnv,
    ) -> Result<i32> {
        process::run_inherited(program, args, env).await
    }

    async fn run_captured(
        &self,
        program: &Path,
        args: &[String],
        env: &ProcessEnv,
    ) -> Result<CapturedOutput> {
        process::run_captured(program, args, env).await
    }
}
