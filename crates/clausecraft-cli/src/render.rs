//! Human-readable terminal output.

use clausecraft_core::{ComposedDocument, FollowUpQuestion, Sector};
use clausecraft_store::Draft;

pub fn sector_list(sectors: &[&Sector]) -> String {
    let width = sectors.iter().map(|s| s.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for sector in sectors {
        out.push_str(&format!("{:width$}  {}\n", sector.key, sector.label));
    }
    out
}

pub fn question_list(questions: &[&FollowUpQuestion]) -> String {
    if questions.is_empty() {
        return "(no follow-up questions)\n".to_string();
    }
    let mut out = String::new();
    for question in questions {
        out.push_str(&format!("{}\n    {}\n", question.id, question.label));
        if let Some(help) = &question.help {
            out.push_str(&format!("    {help}\n"));
        }
        if let Some(patterns) = &question.applies_to {
            let names: Vec<&str> = patterns.iter().map(|p| p.as_str()).collect();
            out.push_str(&format!("    applies to: {}\n", names.join(", ")));
        }
    }
    out
}

pub fn skeleton(doc: &ComposedDocument) -> String {
    if doc.is_empty() {
        return format!("# {} (no clauses)\n", doc.sector);
    }
    format!("# {}\n{}", doc.sector, doc.to_bullet_text())
}

pub fn draft_summary_line(draft: &Draft) -> String {
    format!(
        "{}  [{}]  {}  (updated {})",
        draft.id,
        draft.sector,
        draft.title,
        draft.updated_at.format("%Y-%m-%d %H:%M")
    )
}

pub fn draft_full(draft: &Draft) -> String {
    format!(
        "{}\n{}\n\n{}\n",
        draft.title,
        "=".repeat(draft.title.len()),
        draft.body
    )
}
