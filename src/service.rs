//! Question → gateway → parser, shared by the HTTP API and the CLI.

use thiserror::Error;

use crate::gateway::{Gateway, GatewayError};
use crate::models::Task;
use crate::parser::parse_response;

/// Why a question produced no checklist.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// The model service could not be reached or refused the request.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The service answered, but nothing in the answer looked like a task.
    #[error("The answer contained no usable tasks")]
    NothingGenerated,
}

/// Ask a question and parse the answer into tasks.
///
/// Never returns an empty task list: that case is [`AskError::NothingGenerated`].
pub async fn ask(gateway: &dyn Gateway, question: &str) -> Result<Vec<Task>, AskError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AskError::EmptyQuestion);
    }

    let raw = gateway.fetch(question).await.map_err(|e| {
        tracing::error!(error = %e, "Gateway request failed");
        e
    })?;

    let tasks = parse_response(&raw);
    if tasks.is_empty() {
        tracing::warn!(chars = raw.len(), "Answer contained no tasks");
        return Err(AskError::NothingGenerated);
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned(Result<&'static str, u16>);

    #[async_trait]
    impl Gateway for Canned {
        async fn fetch(&self, _question: &str) -> Result<String, GatewayError> {
            self.0.map(str::to_string).map_err(|status| GatewayError::Service {
                status,
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn returns_parsed_tasks() {
        let tasks = ask(&Canned(Ok("Task 1: Go\n1. Walk")), "get there")
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].subtasks[0].text, "Walk");
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let err = ask(&Canned(Ok("Task 1: Go")), " \n ").await.unwrap_err();
        assert!(matches!(err, AskError::EmptyQuestion));
    }

    #[tokio::test]
    async fn empty_answer_is_nothing_generated() {
        let err = ask(&Canned(Ok("")), "q").await.unwrap_err();
        assert!(matches!(err, AskError::NothingGenerated));
    }

    #[tokio::test]
    async fn gateway_failure_is_kept_apart_from_empty_answer() {
        let err = ask(&Canned(Err(503)), "q").await.unwrap_err();
        match err {
            AskError::Gateway(inner) => assert!(inner.is_retryable()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
