use anyhow::{bail, Context};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    config::{AgentConfig, Settings},
    tools::{Invocation, Operation, PrTool, ToolFactory},
};

/// Builds tools delegating to the configured agent program.
pub struct AgentFactory {
    config: AgentConfig,
    settings: Settings,
}

impl AgentFactory {
    pub fn new(config: AgentConfig, settings: Settings) -> Self {
        Self { config, settings }
    }
}

impl ToolFactory for AgentFactory {
    fn build(&self, invocation: Invocation) -> Box<dyn PrTool> {
        Box::new(AgentTool {
            config: self.config.clone(),
            settings: self.settings.clone(),
            invocation,
        })
    }
}

/// Runs `<program> <args..> --pr_url <url> <operation> [question]` with the settings in its
/// environment.
pub struct AgentTool {
    config: AgentConfig,
    settings: Settings,
    invocation: Invocation,
}

impl AgentTool {
    fn command(&self) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .arg("--pr_url")
            .arg(self.invocation.pr.as_str())
            .arg(self.invocation.operation.verb().as_str());

        if let Operation::Ask { question } = &self.invocation.operation {
            command.arg(question);
        }

        command.envs(self.settings.to_env());
        command
    }
}

#[async_trait]
impl PrTool for AgentTool {
    async fn execute(&self) -> anyhow::Result<()> {
        let verb = self.invocation.operation.verb();
        debug!("spawning `{}` for {}", self.config.program, verb);

        let status = self
            .command()
            .status()
            .await
            .with_context(|| format!("couldn't run {}", self.config.program))?;

        if !status.success() {
            bail!("{} exited with {}", self.config.program, status);
        }

        info!("{} finished on {}", verb, self.invocation.pr);
        Ok(())
    }
}
