//! CLI 명령 파싱 모듈.
//! 첫 위치 인자가 `config`/`report`면 관리 파서, 아니면 실행 모드 파서를 쓴다.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::command::{
    ImportRcOptions, ReportFormat, ReportOptions, RunOptions, SetCredOptions, passthrough_args,
};
use crate::domain::credentials::CliOverrides;

/// 값을 받는 실행 모드 옵션(라우팅 사전 검사용).
const VALUE_OPTIONS: &[&str] = &["--profile", "--catalog", "--rc-file", "--username", "--password"];
const MANAGEMENT_COMMANDS: &[&str] = &["config", "report"];

const RUN_AFTER_HELP: &str = "\
Management commands:
  ossc config import-rc --profile P (--catalog C [--rc-file F] | --rc-dir D)
  ossc config list
  ossc config set-cred --profile P [--password W]
  ossc report [--out DIR] [-f FORMAT] [--profile P] [--catalog C]";

/// 실행 모드: 자격증명을 채운 환경으로 openstack을 실행한다.
#[derive(Debug, Parser)]
#[command(name = "ossc")]
#[command(about = "Run the OpenStack CLI with credentials resolved from RC files and stored profiles")]
#[command(after_help = RUN_AFTER_HELP)]
struct RunCli {
    /// Profile name
    #[arg(long)]
    profile: Option<String>,

    /// Catalog (project) name within the profile
    #[arg(long)]
    catalog: Option<String>,

    /// RC file path (default: <root>/<profile>/rc-<catalog>.sh)
    #[arg(long)]
    rc_file: Option<String>,

    /// Username override
    #[arg(long)]
    username: Option<String>,

    /// Password override
    #[arg(long)]
    password: Option<String>,

    /// Print the resolved environment and command without running it
    #[arg(long)]
    dry_run: bool,

    /// Arguments passed to openstack
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// 관리 모드: 저장소 관리와 리포트 생성.
#[derive(Debug, Parser)]
#[command(name = "ossc")]
#[command(about = "Manage stored OpenStack profiles and generate reports")]
struct ManageCli {
    #[command(subcommand)]
    command: ManageCommand,
}

#[derive(Debug, Subcommand)]
enum ManageCommand {
    /// Manage the profile store
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Run `openstack server list` for stored catalogs and write report files
    Report(ReportArgs),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Import OS_* variables from RC files into a profile
    ImportRc(ImportRcArgs),
    /// List profiles and their catalogs
    List,
    /// Store a password for a profile
    SetCred(SetCredArgs),
}

#[derive(Debug, Args)]
struct ImportRcArgs {
    #[arg(long)]
    profile: String,

    /// Catalog name (single-file import)
    #[arg(long)]
    catalog: Option<String>,

    #[arg(long)]
    rc_file: Option<String>,

    /// Import every *.sh file in this directory
    #[arg(long, conflicts_with_all = ["catalog", "rc_file"])]
    rc_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SetCredArgs {
    #[arg(long)]
    profile: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    password: Option<String>,
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Output directory
    #[arg(long, default_value = "out/reports")]
    out: PathBuf,

    /// openstack output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Table)]
    format: FormatArg,

    #[arg(long)]
    profile: Option<String>,

    #[arg(long)]
    catalog: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Table,
    Value,
    Yaml,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::Table => Self::Table,
            FormatArg::Value => Self::Value,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

#[derive(Debug)]
pub enum CliAction {
    Run(RunOptions),
    ImportRc(ImportRcOptions),
    ListProfiles,
    SetCredential(SetCredOptions),
    Report(ReportOptions),
}

pub struct Cli;

impl Cli {
    /// 프로세스 인자를 파싱한다. 파싱 오류/도움말은 clap이 출력 후 종료한다.
    pub fn parse_action() -> CliAction {
        let args: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::try_parse_action_from(args).unwrap_or_else(|err| err.exit())
    }

    pub fn try_parse_action_from<I, T>(args: I) -> Result<CliAction, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.into().to_string_lossy().into_owned())
            .collect();

        let is_management =
            first_positional(&args).is_some_and(|token| MANAGEMENT_COMMANDS.contains(&token));
        if is_management {
            let cli = ManageCli::try_parse_from(&args)?;
            return Ok(cli.command.into());
        }

        let cli = RunCli::try_parse_from(&args)?;
        Ok(CliAction::Run(cli.into()))
    }
}

/// 프로그램 이름 이후 첫 위치 인자. `--` 이후는 전달 인자이므로 보지 않는다.
fn first_positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        if arg == "--" {
            return None;
        }
        if VALUE_OPTIONS.contains(&arg) {
            iter.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return Some(arg);
    }
    None
}

impl From<RunCli> for RunOptions {
    fn from(cli: RunCli) -> Self {
        RunOptions {
            profile: cli.profile,
            catalog: cli.catalog,
            rc_file: cli.rc_file,
            overrides: CliOverrides {
                username: cli.username,
                password: cli.password,
            },
            dry_run: cli.dry_run,
            command: passthrough_args(cli.command),
        }
    }
}

impl From<ManageCommand> for CliAction {
    fn from(command: ManageCommand) -> Self {
        match command {
            ManageCommand::Config { action } => match action {
                ConfigCommand::ImportRc(args) => CliAction::ImportRc(ImportRcOptions {
                    profile: args.profile,
                    catalog: args.catalog,
                    rc_file: args.rc_file,
                    rc_dir: args.rc_dir,
                }),
                ConfigCommand::List => CliAction::ListProfiles,
                ConfigCommand::SetCred(args) => CliAction::SetCredential(SetCredOptions {
                    profile: args.profile,
                    password: args.password,
                }),
            },
            ManageCommand::Report(args) => CliAction::Report(ReportOptions {
                out: args.out,
                format: args.format.into(),
                profile: args.profile,
                catalog: args.catalog,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        Cli::try_parse_action_from(args.iter().copied()).expect("parse")
    }

    #[test]
    fn run_mode_collects_passthrough_arguments() {
        let CliAction::Run(options) = parse(&[
            "ossc", "--profile", "dev", "--catalog", "app", "server", "list", "--long",
        ]) else {
            panic!("expected run mode");
        };
        assert_eq!(options.profile.as_deref(), Some("dev"));
        assert_eq!(options.catalog.as_deref(), Some("app"));
        assert_eq!(options.command, vec!["server", "list", "--long"]);
        assert!(!options.dry_run);
    }

    #[test]
    fn double_dash_is_stripped_and_protects_management_words() {
        let CliAction::Run(options) = parse(&[
            "ossc", "--profile", "dev", "--catalog", "app", "--dry-run", "--", "config", "show",
        ]) else {
            panic!("expected run mode");
        };
        assert!(options.dry_run);
        assert_eq!(options.command, vec!["config", "show"]);
    }

    #[test]
    fn option_values_are_not_mistaken_for_commands() {
        let CliAction::Run(options) =
            parse(&["ossc", "--profile", "report", "--catalog", "config", "token", "issue"])
        else {
            panic!("expected run mode");
        };
        assert_eq!(options.profile.as_deref(), Some("report"));
        assert_eq!(options.command, vec!["token", "issue"]);
    }

    #[test]
    fn credential_overrides_are_parsed() {
        let CliAction::Run(options) = parse(&[
            "ossc", "--profile", "p", "--catalog", "c", "--username", "u", "--password", "pw",
        ]) else {
            panic!("expected run mode");
        };
        assert_eq!(options.overrides.username.as_deref(), Some("u"));
        assert_eq!(options.overrides.password.as_deref(), Some("pw"));
        assert!(options.command.is_empty());
    }

    #[test]
    fn config_subcommands_route_to_management_parser() {
        assert!(matches!(parse(&["ossc", "config", "list"]), CliAction::ListProfiles));

        let CliAction::ImportRc(options) = parse(&[
            "ossc", "config", "import-rc", "--profile", "dev", "--rc-dir", "/rcs",
        ]) else {
            panic!("expected import-rc");
        };
        assert_eq!(options.profile, "dev");
        assert_eq!(options.rc_dir, Some(PathBuf::from("/rcs")));

        let CliAction::SetCredential(options) =
            parse(&["ossc", "config", "set-cred", "--profile", "dev"])
        else {
            panic!("expected set-cred");
        };
        assert_eq!(options.password, None);
    }

    #[test]
    fn report_defaults_and_format() {
        let CliAction::Report(options) = parse(&["ossc", "report"]) else {
            panic!("expected report");
        };
        assert_eq!(options.out, PathBuf::from("out/reports"));
        assert_eq!(options.format, ReportFormat::Table);

        let CliAction::Report(options) =
            parse(&["ossc", "report", "-f", "json", "--profile", "dev"])
        else {
            panic!("expected report");
        };
        assert_eq!(options.format, ReportFormat::Json);
        assert_eq!(options.profile.as_deref(), Some("dev"));
    }

    #[test]
    fn invalid_report_format_is_rejected() {
        assert!(Cli::try_parse_action_from(["ossc", "report", "-f", "xml"]).is_err());
    }

    #[test]
    fn import_rc_dir_conflicts_with_catalog() {
        let result = Cli::try_parse_action_from([
            "ossc", "config", "import-rc", "--profile", "dev", "--catalog", "app", "--rc-dir", "/rcs",
        ]);
        assert!(result.is_err());
    }
}
