//! 외부 명령 실행기(tokio::process).

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::application::ports::CapturedOutput;
use crate::domain::environment::ProcessEnv;

/// 자식 프로세스 env는 `env`로 완전히 대체한다.
fn command(program: &Path, args: &[String], env: &ProcessEnv) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).env_clear().envs(env);
    cmd
}

/// 표준 입출력을 상속해 실행하고 종료 코드를 반환한다.
pub async fn run_inherited(program: &Path, args: &[String], env: &ProcessEnv) -> Result<i32> {
    let status = command(program, args, env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("failed to run {}", program.display()))?;

    tracing::debug!(program = %program.display(), %status, "command finished");
    Ok(exit_code(status))
}

/// stdout/stderr를 캡처해 실행한다.
pub async fn run_captured(
    program: &Path,
    args: &[String],
    env: &ProcessEnv,
) -> Result<CapturedOutput> {
    let output = command(program, args, env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("failed to run {}", program.display()))?;

    Ok(CapturedOutput {
        status: exit_code(output.status),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// 시그널 종료는 셸 관례대로 128 + 시그널 번호.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
