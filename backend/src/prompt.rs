//! Prompt assembly for the AI providers.
//!
//! Both providers receive the same prompt: a fixed instructions block
//! followed by the user's message.

/// Tone and formatting rules sent ahead of every user message.
pub const SYSTEM_INSTRUCTIONS: &str = "You are a friendly AI assistant like ChatGPT.\n\
Rules:\n\
- Give clean, well-spaced answers\n\
- Use bullet points or tables when useful\n\
- Do NOT use # symbols\n\
- Keep answers clear and readable\n\
- Be concise and helpful\n";

/// Inject the system instructions before the user message.
pub fn build_prompt(user_message: &str) -> String {
    format!("{SYSTEM_INSTRUCTIONS}\n\nUser:\n{user_message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_starts_with_instructions() {
        let prompt = build_prompt("hello");
        assert!(prompt.starts_with(SYSTEM_INSTRUCTIONS));
    }

    #[test]
    fn test_prompt_ends_with_user_message() {
        let prompt = build_prompt("what's the weather like?");
        assert!(prompt.ends_with("what's the weather like?"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("same input"), build_prompt("same input"));
    }

    #[test]
    fn test_prompt_separator() {
        let prompt = build_prompt("x");
        assert!(prompt.contains("\n\nUser:\nx"));
    }
}
