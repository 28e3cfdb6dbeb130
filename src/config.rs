use std::fmt::Debug;

use serde::Deserialize;

const DEFAULT_AGENT_PROGRAM: &str = "pr-agent";

/// Optional YAML configuration, loaded with `--config`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Program running the AI operations, looked up in `PATH` if not absolute.
    pub program: String,
    /// Arguments passed before the pull request url and operation name.
    pub args: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_AGENT_PROGRAM.to_string(),
            args: Vec::new(),
        }
    }
}

/// Credentials and deployment settings handed to every tool. Built once from the environment,
/// read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub openai_key: String,
    pub openai_org: Option<String>,
    pub github_user_token: String,
    pub github_deployment_type: String,
}

impl Settings {
    pub fn new(openai_key: String, openai_org: Option<String>, github_user_token: String) -> Self {
        Self {
            openai_key,
            openai_org,
            github_user_token,
            github_deployment_type: "user".to_string(),
        }
    }

    /// Settings as nested-key environment variables (`SECTION__KEY`), the form the agent reads
    /// its configuration overrides from.
    pub fn to_env(&self) -> Vec<(&'static str, &str)> {
        let mut vars = vec![("OPENAI__KEY", self.openai_key.as_str())];
        if let Some(org) = &self.openai_org {
            vars.push(("OPENAI__ORG", org.as_str()));
        }
        vars.push(("GITHUB__USER_TOKEN", self.github_user_token.as_str()));
        vars.push(("GITHUB__DEPLOYMENT_TYPE", self.github_deployment_type.as_str()));
        vars
    }
}

// keep secrets out of logs
impl Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("openai_key", &"<redacted>")
            .field("openai_org", &self.openai_org)
            .field("github_user_token", &"<redacted>")
            .field("github_deployment_type", &self.github_deployment_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ActionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.agent.program, "pr-agent");
        assert!(config.agent.args.is_empty());
    }

    #[test]
    fn parse_agent_config() {
        let config: ActionConfig = serde_yaml::from_str(
            r#"
agent:
  program: python
  args: ["-m", "pr_agent.cli"]
"#,
        )
        .unwrap();
        assert_eq!(config.agent.program, "python");
        assert_eq!(config.agent.args, vec!["-m", "pr_agent.cli"]);
    }

    #[test]
    fn settings_env_skips_missing_org() {
        let settings = Settings::new("sk-key".to_string(), None, "ghp_token".to_string());
        assert_eq!(
            settings.to_env(),
            vec![
                ("OPENAI__KEY", "sk-key"),
                ("GITHUB__USER_TOKEN", "ghp_token"),
                ("GITHUB__DEPLOYMENT_TYPE", "user"),
            ]
        );

        let settings = Settings::new(
            "sk-key".to_string(),
            Some("org-1".to_string()),
            "ghp_token".to_string(),
        );
        assert!(settings.to_env().contains(&("OPENAI__ORG", "org-1")));
    }

    #[test]
    fn debug_redacts_secrets() {
        let settings = Settings::new("sk-key".to_string(), None, "ghp_token".to_string());
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-key"));
        assert!(!debug.contains("ghp_token"));
        assert!(debug.contains("user"));
    }
}
