//! 저장된 프로필/카탈로그 목록 유스케이스.

use anyhow::Result;

use crate::application::ports::{ProfileStore, Reporter};
use crate::domain::profiles::{ensure_structure, profile_catalogs};

pub struct ListProfilesUseCase<'a> {
    pub store: &'a dyn ProfileStore,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ListProfilesUseCase<'a> {
    /// `name: cat1, cat2` 형식으로 한 줄씩 출력한다. 프로필은 이름순.
    pub fn execute(&self) -> Result<()> {
        let document = ensure_structure(self.store.load()?);
        let listed = profile_catalogs(&document);
        if listed.is_empty() {
            self.reporter.raw("No profiles configured.");
            return Ok(());
        }

        for (profile, catalogs) in listed {
            let catalogs = if catalogs.is_empty() {
                "(no catalogs)".to_string()
            } else {
                catalogs.join(", ")
            };
            self.reporter.raw(&format!("{profile}: {catalogs}"));
        }
        Ok(())
    }
}
