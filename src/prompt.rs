use crate::llm::ChatMessage;
use crate::policy::{BranchPrefix, MAX_BRANCH_NAME_LEN};

/// System instruction describing the naming policy. Prefix list and length cap come from
/// [`crate::policy`], so the prompt and the validator cannot drift apart.
pub fn system_prompt() -> String {
    let mut out = String::from(
        "You are a git branch naming assistant. Follow these rules strictly and output only the branch name.\n\
Pick the most suitable prefix for the description from this list:\n",
    );
    for prefix in BranchPrefix::ALL {
        if let Some((purpose, example)) = prefix.guidance() {
            out.push_str(&format!("- {}: {purpose} (e.g. {example})\n", prefix.as_str()));
        }
    }
    out.push_str(&format!(
        "Rules:\n\
- The branch name alone should make the purpose of the change clear.\n\
- Use only lowercase letters (a-z), digits (0-9) and hyphens (-) as separators. No underscores, spaces or other special characters. \
Dots (.) are allowed only in release versions (e.g. release/v1.2.0).\n\
- No consecutive, leading or trailing hyphens or dots (not feature/new--login, release/v1.-2.0, feature/-new-login or release/v1.2.0.).\n\
- Keep it short and specific to the work being done.\n\
- Include the ticket number when there is one, e.g. feature/issue-123-new-login for ticket issue-123.\n\
Output:\n\
- Output only the branch name, with no explanation or extra text.\n\
- The whole branch name must not exceed {MAX_BRANCH_NAME_LEN} characters.",
    ));
    out
}

pub fn user_prompt(description: &str) -> String {
    format!("Description: {}", description.trim())
}

pub fn build_messages(description: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(description)),
    ]
}
