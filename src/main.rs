//! `ossc` 바이너리 진입점.

use anyhow::Result;

use ossc::domain::error::OsscError;
use ossc::interface::cli::{Cli, CliAction};
use ossc::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = Cli::parse_action();

    let code = match dispatch(action).await {
        Ok(code) => code,
        Err(err) => report_error(&err),
    };
    std::process::exit(code);
}

async fn dispatch(action: CliAction) -> Result<i32> {
    let composition = AppComposition::from_env()?;
    tracing::debug!(root = %composition.root().display(), "composition ready");

    match action {
        CliAction::Run(options) => composition.run_usecase().execute(options).await,
        CliAction::ImportRc(options) => {
            composition.import_rc_usecase().execute(options)?;
            Ok(0)
        }
        CliAction::ListProfiles => {
            composition.list_profiles_usecase().execute()?;
            Ok(0)
        }
        CliAction::SetCredential(options) => {
            composition.set_credential_usecase().execute(options)?;
            Ok(0)
        }
        CliAction::Report(options) => composition.report_usecase().execute(options).await,
    }
}

/// 도메인 오류는 고유 종료 코드로, 그 외는 1로 매핑한다.
fn report_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<OsscError>() {
        Some(typed) => {
            eprintln!("{typed}");
            typed.exit_code()
        }
        None => {
            eprintln!("error: {err:#}");
            1
        }
    }
}
