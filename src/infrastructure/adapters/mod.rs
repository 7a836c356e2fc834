//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod command_runner;
mod environment;
mod profile_store;
mod prompter;
mod rc_reader;
mod report_writer;
mod reporter;
mod tool_locator;

pub use command_runner::ProcessCommandRunner;
pub use environment::SystemEnvironment;
pub use profile_store::JsonProfileStore;
pub use prompter::TerminalPrompter;
pub use rc_reader::FsRcReader;
pub use report_writer::FsReportWriter;
pub use reporter::ConsoleReporter;
pub use tool_locator::VenvToolLocator;
