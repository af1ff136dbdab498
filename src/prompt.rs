use crate::suggest::StyleHints;

pub const SYSTEM_PROMPT: &str = r#"You are a commit message generator. Read the diff you are given and write a clear commit message that follows the conventional commit format.

## HEADING FORMAT

<type>(<scope>): <summary>

- type: lowercase (feat, fix, refactor, docs, test, chore, perf, ci, build, style, revert)
- scope: optional, the module or component the change touches
- summary: imperative mood, at most 50 characters, no period at the end

## BODY

Add a body only when the change needs explaining. Wrap lines at 72 characters. Explain what changed and why, not how.

## OUTPUT

Output ONLY the commit message. No markdown. No code blocks. No explanations."#;

pub const SHORTER_MARKER: &str =
    "Style: make the message shorter. A single heading line, no body unless essential.";
pub const LONGER_MARKER: &str =
    "Style: make the message longer and more detailed. Include a body that covers every notable change.";
pub const CONTEXT_HEADING: &str = "Additional context from the user:";

pub fn build_user_prompt(diff: &str, hints: &StyleHints) -> String {
    let mut prompt = format!("Diff:\n```diff\n{}\n```", diff.trim_end_matches('\n'));

    let mut style = Vec::new();
    if hints.shorter {
        style.push(SHORTER_MARKER.to_string());
    }
    if hints.longer {
        style.push(LONGER_MARKER.to_string());
    }
    if let Some(context) = &hints.context {
        style.push(format!("{CONTEXT_HEADING}\n{context}"));
    }

    if !style.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(&style.join("\n\n"));
    }

    prompt.push_str("\n\nGenerate a commit message.");
    prompt
}
