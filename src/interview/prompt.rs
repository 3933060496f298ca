//! Fixed prompts sent on behalf of the founder

const OPENING_PREFIX: &str =
    "Analyze this pitch deck and ask me the first question as if you are an angel investor: ";

pub const CLOSING_PROMPT: &str =
    "Thank you. Please provide a final review with strengths, weaknesses, and suggestions.";

/// Seed turn of every interview, embedding the extracted deck text.
pub fn opening_prompt(document_text: &str) -> String {
    format!("{OPENING_PREFIX}{document_text}")
}
