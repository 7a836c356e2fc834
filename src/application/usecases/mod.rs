//! 유스케이스 모음. 각 유스케이스는 포트만 참조한다.

pub mod import_rc;
pub mod list_profiles;
pub mod report;
pub mod run_command;
pub mod set_credential;

#[cfg(test)]
pub(crate) mod testing;
