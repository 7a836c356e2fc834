//! 외부 도구(openstack CLI) 탐색과 가상환경 부트스트랩.

mod bootstrap;
mod lookup;

pub use bootstrap::{Bootstrapper, user_venv_dir};
pub use lookup::find_executable;
