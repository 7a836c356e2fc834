//! 프로필 비밀번호 저장 유스케이스.

use anyhow::Result;
use serde_json::json;

use crate::application::ports::{CredentialPrompter, ProfileStore, Reporter};
use crate::domain::command::SetCredOptions;
use crate::domain::error::OsscError;
use crate::domain::profiles::set_profile_field;

/// 비밀번호만 기록한다. 사용자명은 RC/카탈로그에서 온다.
pub struct SetCredentialUseCase<'a> {
    pub store: &'a dyn ProfileStore,
    pub prompter: &'a dyn CredentialPrompter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> SetCredentialUseCase<'a> {
    pub fn execute(&self, options: SetCredOptions) -> Result<()> {
        let password = match options.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(password),
            None => self.prompter.prompt_password()?,
        };
        let Some(password) = password else {
            return Err(
                OsscError::Usage("No password provided; nothing changed.".to_string()).into(),
            );
        };

        let mut patch = json!({});
        set_profile_field(&mut patch, &options.profile, "password", &password);
        let path = self.store.save(&patch)?;
        tracing::info!(profile = %options.profile, path = %path.display(), "password updated");

        self.reporter
            .raw(&format!("Updated password for profile '{}'.", options.profile));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::usecases::testing::{FakePrompter, FakeStore, RecordingReporter};

    fn options(password: Option<&str>) -> SetCredOptions {
        SetCredOptions {
            profile: "dev".to_string(),
            password: password.map(ToString::to_string),
        }
    }

    #[test]
    fn stores_password_without_touching_catalogs() {
        let store = FakeStore::with_document(json!({
            "profiles": {"dev": {"catalogs": {"app": {"OS_AUTH_URL": "u"}}}}
        }));
        let prompter = FakePrompter::non_interactive();
        let reporter = RecordingReporter::default();
        SetCredentialUseCase {
            store: &store,
            prompter: &prompter,
            reporter: &reporter,
        }
        .execute(options(Some("secret")))
        .expect("set-cred");

        let doc = store.document();
        assert_eq!(doc["profiles"]["dev"]["password"], "secret");
        assert_eq!(doc["profiles"]["dev"]["catalogs"]["app"]["OS_AUTH_URL"], "u");
        assert_eq!(
            reporter.lines(),
            vec!["Updated password for profile 'dev'.".to_string()]
        );
    }

    #[test]
    fn prompts_when_password_flag_is_missing() {
        let store = FakeStore::with_document(json!({}));
        let prompter = FakePrompter::answering(None, Some("typed"));
        let reporter = RecordingReporter::default();
        SetCredentialUseCase {
            store: &store,
            prompter: &prompter,
            reporter: &reporter,
        }
        .execute(options(None))
        .expect("set-cred");
        assert_eq!(store.document()["profiles"]["dev"]["password"], "typed");
    }

    #[test]
    fn empty_prompt_changes_nothing() {
        let store = FakeStore::with_document(json!({}));
        let prompter = FakePrompter::answering(None, None);
        let reporter = RecordingReporter::default();
        let err = SetCredentialUseCase {
            store: &store,
            prompter: &prompter,
            reporter: &reporter,
        }
        .execute(options(None))
        .unwrap_err();

        assert_eq!(err.to_string(), "No password provided; nothing changed.");
        assert!(store.saved().is_empty());
    }
}
