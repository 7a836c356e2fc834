//! Domain layer
//! 자격증명/설정 해석 규칙(RC 파싱, 문서 마이그레이션/병합, 우선순위, 환경 조립)을
//! 파일시스템/프로세스 접근 없이 표현한다.

pub mod command;
pub mod credentials;
pub mod environment;
pub mod error;
pub mod profiles;
pub mod rc;
