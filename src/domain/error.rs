//! 호출 계층이 종료 코드로 변환하는 도메인 오류.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OsscError {
    #[error("RC file not found: {}", path.display())]
    RcNotFound { path: PathBuf },

    #[error("Missing required variables: {}", missing.join(", "))]
    MissingCredentials { missing: Vec<String> },

    #[error("'openstack' CLI not found and auto-setup failed. See README for manual setup.")]
    ToolUnavailable,

    #[error("Failed to bootstrap virtualenv for openstackclient: {0}")]
    Bootstrap(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    NotFound(String),
}

impl OsscError {
    /// 프로세스 종료 코드.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolUnavailable | Self::Bootstrap(_) => 127,
            Self::RcNotFound { .. }
            | Self::MissingCredentials { .. }
            | Self::Usage(_)
            | Self::NotFound(_) => 2,
        }
    }
}
