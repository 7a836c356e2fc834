//! 자격증명 입력 포트 구현 어댑터.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};

use crate::application::ports::CredentialPrompter;

/// 터미널에서 사용자명/비밀번호를 입력받는다. 프롬프트는 stderr로 출력한다.
pub struct TerminalPrompter;

impl CredentialPrompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn prompt_username(&self, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(default) => eprint!("OpenStack username [{default}]: "),
            None => eprint!("OpenStack username: "),
        }
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("failed to read username")?;
        Ok(non_empty(input.trim()))
    }

    fn prompt_password(&self) -> Result<Option<String>> {
        let input = rpassword::prompt_password("OpenStack password (hidden): ")
            .context("failed to read password")?;
        Ok(non_empty(&input))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
