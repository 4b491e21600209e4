//! Instruction payload assembly: composed clause skeleton + user brief.

use clausecraft_core::ComposedDocument;

/// Default drafting instruction prepended to every generation request.
const SYSTEM_INSTRUCTION: &str = "You are a legal drafting assistant for small UK businesses. \
Draft clear, complete documents in plain English. Do not invent terms the \
instructions do not ask for, and do not add commentary around the document.";

/// Builds the text payload handed to the completion call.
///
/// Pure string assembly; the skeleton's clause ordering is preserved as-is.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    document_type: String,
}

impl PromptBuilder {
    /// `document_type` is the kind of document being drafted,
    /// e.g. "employment contract".
    pub fn new(document_type: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
        }
    }

    /// The system-role instruction for the completion call.
    pub fn system_instruction(&self) -> &'static str {
        SYSTEM_INSTRUCTION
    }

    /// Merge the clause skeleton and the user's free-text brief into one
    /// instruction payload.
    ///
    /// An empty skeleton is valid; the clause section is omitted entirely
    /// rather than rendered as an empty list.
    pub fn build(&self, skeleton: &ComposedDocument, brief: &str) -> String {
        let mut payload = format!("Draft a complete {}.\n", self.document_type);

        if !skeleton.is_empty() {
            payload.push_str("\nThe document must include the following clauses:\n");
            payload.push_str(&skeleton.to_bullet_text());
        }

        let brief = brief.trim();
        if !brief.is_empty() {
            payload.push_str("\nBrief from the client:\n");
            payload.push_str(brief);
            payload.push('\n');
        }

        payload
    }
}
