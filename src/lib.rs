//! ossc library root.
//! RC 파일과 저장된 프로필에서 OpenStack 자격증명을 해석해 openstack CLI를 실행한다.
//! Clean Architecture 계층(domain/application/infrastructure/interface)을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::command::RunOptions;
use interface::composition::AppComposition;

/// 라이브러리 직접 호출용 실행 함수. 자식 종료 코드를 반환한다.
pub async fn run(options: RunOptions) -> Result<i32> {
    let composition = AppComposition::from_env()?;
    composition.run_usecase().execute(options).await
}
