use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

mod config;
use config::ActionConfig;

mod dispatch;
use dispatch::dispatch;

mod preconditions;
use preconditions::{validate, Inputs};

mod report;
use report::{filter_directives, Diagnostic};

mod tools;
use tools::AgentFactory;

mod webhooks;
use webhooks::classify;

#[derive(Parser)]
#[command(version, about = "Runs AI pull request tools from a GitHub Actions event")]
struct Opts {
    /// Configuration file for the agent program
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit with a distinct non-zero status when the run can't proceed
    #[arg(long)]
    strict: bool,

    /// Name of the webhook event that triggered the workflow
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<String>,

    #[arg(long, env = "OPENAI_KEY", hide_env_values = true)]
    openai_key: Option<String>,

    #[arg(long, env = "OPENAI_ORG")]
    openai_org: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

impl Opts {
    fn inputs(&self) -> Inputs {
        Inputs {
            event_name: self.event_name.clone(),
            event_path: self.event_path.as_ref().map(PathBuf::from),
            openai_key: self.openai_key.clone(),
            openai_org: self.openai_org.clone(),
            github_token: self.github_token.clone(),
        }
    }

    fn load_config(&self) -> anyhow::Result<ActionConfig> {
        let path = match &self.config {
            Some(path) => path,
            None => return Ok(ActionConfig::default()),
        };

        let config_file =
            File::open(path).with_context(|| format!("couldn't open {}:", path.display()))?;
        serde_yaml::from_reader(BufReader::new(config_file)).context("couldn't parse config file")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::new(filter_directives(std::env::var("RUST_LOG").ok()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let opts = Opts::parse();
    let config = opts.load_config()?;

    let validated = match validate(opts.inputs()) {
        Ok(validated) => validated,
        Err(e) => {
            let diagnostic = Diagnostic::from(&e);
            diagnostic.emit();
            return Ok(diagnostic.exit_code(opts.strict));
        }
    };

    let classification = classify(&validated.event);
    let factory = AgentFactory::new(config.agent, validated.settings);

    let outcome = dispatch(classification, &factory).await?;
    let diagnostic = Diagnostic::from(&outcome);
    diagnostic.emit();

    Ok(diagnostic.exit_code(opts.strict))
}
