//! Prompt construction for the answer service.
//!
//! A single pure function assembles the instruction block sent to the
//! model: role restriction, the syllabus text, formatting rules with the
//! refusal wording, and the user's question.

/// Reply the model is instructed to give for off-topic questions.
///
/// Public so the interactive shell and tests can match on the exact wording.
pub const REFUSAL_MESSAGE: &str = "I'm here to help only with what's inside the lesson plan. \
Could you please ask something related to the phonics or topics listed there?";

/// Prompt template for answering questions about the syllabus.
///
/// Restricts the assistant to the supplied document text, spells out the
/// bullet-section answer format, and embeds the refusal wording for
/// unrelated questions.
const PROMPT_TEMPLATE: &str = r#"You are a helpful assistant trained to answer ONLY from the following preprimary phonics syllabus content:

"""
{content}
"""

If the user's question is NOT clearly related to the content (like general education tips, other subjects, or off-topic questions), gently reply:

{refusal}

When the question is related, format your answer with short bullet sections covering the topic, the key information from the syllabus, and any matching classroom activity.

Now, using the above syllabus content, answer the question clearly and concisely:
**{question}**"#;

/// Builds the full prompt for one question.
///
/// Pure and deterministic: identical inputs always produce an identical
/// string, and the output contains `document_text` and `question` verbatim.
#[must_use]
pub fn build_prompt(document_text: &str, question: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{content}", document_text)
        .replace("{refusal}", REFUSAL_MESSAGE)
        .replace("{question}", question)
}
