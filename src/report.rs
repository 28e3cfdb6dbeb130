use std::process::ExitCode;

use tracing::{info, warn, Level};

use crate::{commands::normalize, dispatch::Outcome, preconditions::PreconditionError};

/// Exit status of an unknown command in strict mode.
const UNRECOGNIZED_EXIT_CODE: u8 = 4;

/// Filter used when `RUST_LOG` isn't set. CI runners don't set it, and every outcome line must
/// still reach the job log.
const DEFAULT_FILTER: &str = "info";

pub fn filter_directives(rust_log: Option<String>) -> String {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// The line printed at the end of a run that didn't fail, and its strict-mode exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    strict_code: Option<u8>,
}

impl Diagnostic {
    pub fn emit(&self) {
        if self.level == Level::WARN {
            warn!("{}", self.message);
        } else {
            info!("{}", self.message);
        }
    }

    pub fn exit_code(&self, strict: bool) -> ExitCode {
        match self.strict_code {
            Some(code) if strict => ExitCode::from(code),
            _ => ExitCode::SUCCESS,
        }
    }
}

impl From<&PreconditionError> for Diagnostic {
    fn from(error: &PreconditionError) -> Self {
        Self {
            level: Level::WARN,
            message: error.to_string(),
            strict_code: Some(error.exit_code()),
        }
    }
}

impl From<&Outcome> for Diagnostic {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Dispatched(verb) => Self {
                level: Level::INFO,
                message: format!("{} done", verb),
                strict_code: None,
            },
            Outcome::Ignored(reason) => Self {
                level: Level::INFO,
                message: format!("nothing to do: {}", reason),
                strict_code: None,
            },
            Outcome::Unrecognized(body) => Self {
                level: Level::WARN,
                message: format!("Unknown command: {}", normalize(body)),
                strict_code: Some(UNRECOGNIZED_EXIT_CODE),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;
    use tracing_subscriber::EnvFilter;

    use crate::{
        commands::Verb,
        dispatch::route,
        preconditions::{validate, Field, Inputs},
        webhooks::{classify, IgnoreReason, WebhookEvent},
    };

    use super::*;

    const PR_URL: &str = "https://api.github.com/repos/prologin/site/pulls/42";

    fn outcome_of(event: &WebhookEvent) -> Outcome {
        route(classify(event)).expect_err("event shouldn't dispatch anything")
    }

    // the default filter lets through everything at info and above
    fn printed_by_default(diagnostic: &Diagnostic) -> bool {
        diagnostic.level <= Level::INFO
    }

    #[test]
    fn default_filter_without_rust_log() {
        assert_eq!(filter_directives(None), "info");
        assert_eq!(filter_directives(Some("  ".to_string())), "info");
        assert_eq!(
            filter_directives(Some("pr_action=trace".to_string())),
            "pr_action=trace"
        );
        assert!(EnvFilter::try_new(filter_directives(None)).is_ok());
    }

    #[test]
    fn unknown_command_prints_normalized_body() {
        let event = WebhookEvent::new(
            "issue_comment",
            json!({
                "action": "created",
                "comment": { "body": "  /Unknown " },
                "issue": { "pull_request": { "url": PR_URL } },
            }),
        );
        let outcome = outcome_of(&event);
        assert_eq!(outcome, Outcome::Unrecognized("  /Unknown ".to_string()));

        let diagnostic = Diagnostic::from(&outcome);
        assert_eq!(diagnostic.message, "Unknown command: /unknown");
        assert_eq!(diagnostic.level, Level::WARN);
        assert!(printed_by_default(&diagnostic));
    }

    #[test]
    fn missing_credential_prints_variable_and_stops() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"action": "opened", "pull_request": {{"url": "{}"}}}}"#,
            PR_URL
        )
        .unwrap();

        let error = validate(Inputs {
            event_name: Some("pull_request".to_string()),
            event_path: Some(file.path().to_path_buf()),
            openai_key: None,
            openai_org: None,
            github_token: Some("ghp_token".to_string()),
        })
        .expect_err("validation should fail without a credential");
        assert!(matches!(
            error,
            PreconditionError::MissingConfiguration(Field::Credential)
        ));

        let diagnostic = Diagnostic::from(&error);
        assert_eq!(diagnostic.message, "OPENAI_KEY not set");
        assert!(printed_by_default(&diagnostic));
    }

    #[test]
    fn missing_event_name_is_printed() {
        let error = validate(Inputs::default()).unwrap_err();
        let diagnostic = Diagnostic::from(&error);
        assert_eq!(diagnostic.message, "GITHUB_EVENT_NAME not set");
        assert!(printed_by_default(&diagnostic));
    }

    #[test]
    fn ignored_event_is_printed() {
        let event = WebhookEvent::new("push", json!({}));
        let outcome = outcome_of(&event);
        assert_eq!(
            outcome,
            Outcome::Ignored(IgnoreReason::UnsupportedEvent("push".to_string()))
        );

        let diagnostic = Diagnostic::from(&outcome);
        assert_eq!(diagnostic.message, "nothing to do: event `push` is not handled");
        assert!(printed_by_default(&diagnostic));
    }

    #[test]
    fn dispatched_run_is_printed() {
        let diagnostic = Diagnostic::from(&Outcome::Dispatched(Verb::Ask));
        assert_eq!(diagnostic.message, "ask done");
        assert!(printed_by_default(&diagnostic));
    }
}
