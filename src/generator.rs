use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::{ChatCompletion, ChatRequest, CompletionError, LlmConfig, OpenAiClient};
use crate::policy::{check_branch_name, Rejection};
use crate::prompt;

pub const TEMPERATURE: f32 = 0.2;
pub const MAX_TOKENS: u32 = 32;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("llm output invalid by policy: {raw:?} ({reason})")]
    PolicyInvalid { raw: String, reason: Rejection },
}

/// Prompt, one completion, one validation pass.
pub struct BranchNameGenerator<C> {
    client: C,
    model: String,
}

impl<C: ChatCompletion> BranchNameGenerator<C> {
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn generate(&self, description: &str) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: prompt::build_messages(description),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let raw = self.client.complete(&request)?;
        debug!(%raw, "llm branch candidate");

        check_branch_name(&raw).map_err(|reason| {
            warn!(%raw, %reason, "llm branch candidate rejected");
            GenerateError::PolicyInvalid { raw, reason }
        })
    }
}

/// Generates a branch name for `description` using the endpoint configured in the environment.
///
/// Reads `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `OPENAI_MODEL` on every call.
pub fn generate_branch_name(description: &str) -> Result<String, GenerateError> {
    let config = LlmConfig::from_env();
    let model = config.model.clone();
    BranchNameGenerator::new(OpenAiClient::new(config), model).generate(description)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::llm::Role;

    struct FakeClient {
        reply: fn() -> Result<String, CompletionError>,
        seen: RefCell<Vec<ChatRequest>>,
    }

    impl FakeClient {
        fn new(reply: fn() -> Result<String, CompletionError>) -> Self {
            Self {
                reply,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChatCompletion for FakeClient {
        fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
            self.seen.borrow_mut().push(request.clone());
            (self.reply)()
        }
    }

    #[test]
    fn accepted_candidate_is_canonicalized() {
        let generator = BranchNameGenerator::new(
            FakeClient::new(|| Ok("Feature/Add-Login-Page".to_string())),
            "test-model",
        );
        assert_eq!(
            generator.generate(" add a login page ").unwrap(),
            "feature/add-login-page"
        );

        let seen = generator.client.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "test-model");
        assert_eq!(seen[0].temperature, TEMPERATURE);
        assert_eq!(seen[0].max_tokens, MAX_TOKENS);
        assert_eq!(seen[0].messages[0].role, Role::System);
        assert_eq!(seen[0].messages[1].content, "Description: add a login page");
    }

    #[test]
    fn rejected_candidate_is_policy_invalid() {
        let generator = BranchNameGenerator::new(
            FakeClient::new(|| Ok("chore/update.deps".to_string())),
            "m",
        );
        match generator.generate("bump deps") {
            Err(GenerateError::PolicyInvalid { raw, reason }) => {
                assert_eq!(raw, "chore/update.deps");
                assert_eq!(reason, Rejection::DotOutsideRelease);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn client_errors_pass_through() {
        let generator =
            BranchNameGenerator::new(FakeClient::new(|| Err(CompletionError::EmptyChoices)), "m");
        assert!(matches!(
            generator.generate("x"),
            Err(GenerateError::Completion(CompletionError::EmptyChoices))
        ));
    }

    #[test]
    fn errors_have_messages() {
        let err = GenerateError::PolicyInvalid {
            raw: "Topic/X".to_string(),
            reason: Rejection::UnknownPrefix,
        };
        assert!(err.to_string().contains("invalid by policy"));
        let err = GenerateError::from(CompletionError::MissingCredential);
        assert_eq!(err.to_string(), "missing OPENAI_API_KEY");
    }
}
