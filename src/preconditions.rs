use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{config::Settings, webhooks::WebhookEvent};

/// Raw inputs of a run, as found in the environment. Empty values count as missing.
#[derive(Debug, Default, Clone)]
pub struct Inputs {
    pub event_name: Option<String>,
    pub event_path: Option<PathBuf>,
    pub openai_key: Option<String>,
    pub openai_org: Option<String>,
    pub github_token: Option<String>,
}

/// Required input, named after the environment variable providing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    EventName,
    PayloadPath,
    Credential,
    Token,
}

impl Field {
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::EventName => "GITHUB_EVENT_NAME",
            Self::PayloadPath => "GITHUB_EVENT_PATH",
            Self::Credential => "OPENAI_KEY",
            Self::Token => "GITHUB_TOKEN",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_var())
    }
}

#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("{0} not set")]
    MissingConfiguration(Field),
    #[error("failed to parse event payload {}: {source}", .path.display())]
    MalformedPayload {
        path: PathBuf,
        #[source]
        source: PayloadError,
    },
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PreconditionError {
    /// Exit status used in strict mode.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingConfiguration(_) => 2,
            Self::MalformedPayload { .. } => 3,
        }
    }
}

/// A run whose inputs are all present and whose payload parsed.
#[derive(Debug)]
pub struct Validated {
    pub event: WebhookEvent,
    pub settings: Settings,
}

/// Checks the inputs one after the other, stopping at the first failure. The payload is read and
/// parsed before the credentials are looked at.
pub fn validate(inputs: Inputs) -> Result<Validated, PreconditionError> {
    let event_name = require(inputs.event_name, Field::EventName)?;
    let event_path = inputs
        .event_path
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or(PreconditionError::MissingConfiguration(Field::PayloadPath))?;

    trace!("reading event payload from {}", event_path.display());
    let payload = read_payload(&event_path).map_err(|source| {
        PreconditionError::MalformedPayload {
            path: event_path.clone(),
            source,
        }
    })?;

    let openai_key = require(inputs.openai_key, Field::Credential)?;
    let openai_org = inputs.openai_org.filter(|org| !org.is_empty());
    let github_token = require(inputs.github_token, Field::Token)?;

    debug!("preconditions met for `{}` event", event_name);
    Ok(Validated {
        event: WebhookEvent::new(event_name, payload),
        settings: Settings::new(openai_key, openai_org, github_token),
    })
}

fn require(value: Option<String>, field: Field) -> Result<String, PreconditionError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(PreconditionError::MissingConfiguration(field))
}

fn read_payload(path: &Path) -> Result<serde_json::Value, PayloadError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
