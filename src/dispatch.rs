use thiserror::Error;
use tracing::{debug, info};

use crate::{
    commands::{extract, Command, Extraction, Verb},
    tools::{Invocation, Operation, ToolFactory},
    webhooks::{Classification, IgnoreReason, PullRequestUrl},
};

/// How a run ended when no tool failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Dispatched(Verb),
    Ignored(IgnoreReason),
    /// The comment held no known command. Holds the comment as it was posted.
    Unrecognized(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{verb} failed on {pr}")]
    HandlerFailure {
        verb: Verb,
        pr: PullRequestUrl,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Turns a classification into the single tool invocation it calls for, if any.
pub fn route(classification: Classification) -> Result<Invocation, Outcome> {
    match classification {
        Classification::ReviewTrigger(pr) => Ok(Invocation {
            pr,
            operation: Operation::Review,
        }),
        Classification::CommentCommand { pr, body } => match extract(&body) {
            Extraction::Recognized(command) => Ok(Invocation {
                pr,
                operation: operation_for(command),
            }),
            Extraction::Unrecognized(body) => Err(Outcome::Unrecognized(body)),
        },
        Classification::Ignore(reason) => Err(Outcome::Ignored(reason)),
    }
}

fn operation_for(command: Command) -> Operation {
    match command.verb {
        Verb::Review => Operation::Review,
        Verb::Describe => Operation::Describe,
        Verb::Improve => Operation::Improve,
        // a missing question is asked as an empty one
        Verb::Ask => Operation::Ask {
            question: command.argument.unwrap_or_default(),
        },
    }
}

/// Runs at most one tool for the event, and waits for it to finish.
pub async fn dispatch<F: ToolFactory>(
    classification: Classification,
    factory: &F,
) -> Result<Outcome, DispatchError> {
    let invocation = match route(classification) {
        Ok(invocation) => invocation,
        Err(outcome) => {
            debug!("nothing to dispatch: {:?}", outcome);
            return Ok(outcome);
        }
    };

    let verb = invocation.operation.verb();
    let pr = invocation.pr.clone();
    info!("running {} on {}", verb, pr);

    let tool = factory.build(invocation);
    tool.execute()
        .await
        .map_err(|e| DispatchError::HandlerFailure {
            verb,
            pr,
            source: e.into(),
        })?;

    Ok(Outcome::Dispatched(verb))
}
