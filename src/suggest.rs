use crate::error::Result;
use crate::prompt::build_user_prompt;
use std::fmt;
use tracing::debug;

pub const NO_CHANGES: &str = "No changes to summarize";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleHints {
    pub shorter: bool,
    pub longer: bool,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Message(String),
    NoChanges,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Message(message) => f.write_str(message),
            Suggestion::NoChanges => f.write_str(NO_CHANGES),
        }
    }
}

pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

pub fn suggest_commit(
    generator: &dyn TextGenerator,
    diff: &str,
    hints: &StyleHints,
) -> Result<Suggestion> {
    if diff.trim().is_empty() {
        debug!("diff is empty, skipping generation");
        return Ok(Suggestion::NoChanges);
    }

    let prompt = build_user_prompt(diff, hints);
    debug!(prompt_chars = prompt.len(), ?hints, "requesting suggestion");
    generator.generate(&prompt).map(Suggestion::Message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitAiError;
    use crate::prompt::{LONGER_MARKER, SHORTER_MARKER};
    use std::cell::RefCell;

    struct CapturingGenerator {
        reply: &'static str,
        prompts: RefCell<Vec<String>>,
    }

    impl CapturingGenerator {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for CapturingGenerator {
        fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.reply.to_string())
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(GitAiError::NetworkError("connection reset".to_string()))
        }
    }

    #[test]
    fn empty_diff_returns_sentinel_without_calling_service() -> Result<()> {
        let generator = CapturingGenerator::new("unused");

        for diff in ["", "\n", "   \n\t"] {
            let suggestion = suggest_commit(&generator, diff, &StyleHints::default())?;
            assert_eq!(suggestion, Suggestion::NoChanges);
            assert_eq!(suggestion.to_string(), NO_CHANGES);
        }
        assert!(generator.prompts.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn service_output_is_returned_unmodified() -> Result<()> {
        let generator = CapturingGenerator::new("feat: add X");

        let suggestion = suggest_commit(&generator, "+x", &StyleHints::default())?;
        assert_eq!(suggestion, Suggestion::Message("feat: add X".to_string()));
        assert_eq!(suggestion.to_string(), "feat: add X");
        assert_eq!(generator.prompts.borrow().len(), 1);
        Ok(())
    }

    #[test]
    fn whitespace_in_service_output_is_kept() -> Result<()> {
        let generator = CapturingGenerator::new("  fix: keep spacing\n\n");

        let suggestion = suggest_commit(&generator, "+x", &StyleHints::default())?;
        assert_eq!(suggestion.to_string(), "  fix: keep spacing\n\n");
        Ok(())
    }

    #[test]
    fn hints_reach_the_service_prompt() -> Result<()> {
        let generator = CapturingGenerator::new("ok");
        let hints = StyleHints {
            shorter: true,
            longer: true,
            context: Some("make it focus on the security aspects".to_string()),
        };

        suggest_commit(&generator, "+add foo.py", &hints)?;

        let prompts = generator.prompts.borrow();
        let prompt = &prompts[0];
        assert!(prompt.contains("+add foo.py"));
        assert!(prompt.contains("make it focus on the security aspects"));
        assert!(prompt.contains(SHORTER_MARKER));
        assert!(prompt.contains(LONGER_MARKER));
        Ok(())
    }

    #[test]
    fn service_errors_propagate() {
        let result = suggest_commit(&FailingGenerator, "+x", &StyleHints::default());
        assert!(matches!(result, Err(GitAiError::NetworkError(msg)) if msg == "connection reset"));
    }
}
