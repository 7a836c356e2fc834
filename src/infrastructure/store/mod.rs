//! 사용자 프로필 저장소(profiles.json) 로딩/저장 모듈.
//! 저장은 항상 디스크 내용 위에 deep-merge 하며, 소유자 전용 권한으로 기록한다.

mod json_store;
mod paths;

pub use json_store::{load_document, save_document};
pub use paths::{APP_DIR, STORE_FILE, storage_path};
