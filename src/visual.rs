use std::io::Write;

use colored::*;
use serde_json::Value;

use crate::models::{is_truthy, js_string, number_string, ThoughtRecord};

/// Boxed console rendering of recorded thoughts.
///
/// Output goes to stderr; stdout belongs to the MCP transport.
#[derive(Clone, Debug, Default)]
pub struct VisualOutput;

/// Kind of entry, chosen from the record's revision and branch fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThoughtKind {
    Revision,
    Branch,
    Thought,
}

impl ThoughtKind {
    pub fn of(record: &ThoughtRecord) -> Self {
        if is_truthy(record.is_revision.as_ref()) {
            ThoughtKind::Revision
        } else if is_truthy(record.branch_from_thought.as_ref()) {
            ThoughtKind::Branch
        } else {
            ThoughtKind::Thought
        }
    }

    fn label(self) -> &'static str {
        match self {
            ThoughtKind::Revision => "🔄 Revision",
            ThoughtKind::Branch => "🌿 Branch",
            ThoughtKind::Thought => "💭 Thought",
        }
    }

    fn paint(self, label: &str) -> String {
        match self {
            ThoughtKind::Revision => label.yellow().to_string(),
            ThoughtKind::Branch => label.green().to_string(),
            ThoughtKind::Thought => label.blue().to_string(),
        }
    }
}

impl VisualOutput {
    pub fn new() -> Self {
        Self
    }

    /// Print a thought box to stderr. Write failures are ignored.
    pub fn display_thought(&self, record: &ThoughtRecord) {
        let rendered = self.format_thought(record, true);
        let _ = writeln!(std::io::stderr(), "{}", rendered);
    }

    /// Render a thought box. With `colorize` off the output has no ANSI escapes.
    pub fn format_thought(&self, record: &ThoughtRecord, colorize: bool) -> String {
        let kind = ThoughtKind::of(record);
        let context = match kind {
            ThoughtKind::Revision => format!(
                " (revising thought {})",
                display_or_unknown(record.revises_thought.as_ref())
            ),
            ThoughtKind::Branch => format!(
                " (from thought {}, ID: {})",
                display_or_unknown(record.branch_from_thought.as_ref()),
                display_or_unknown(record.branch_id.as_ref())
            ),
            ThoughtKind::Thought => String::new(),
        };

        let label = kind.label();
        let rest = format!(
            " {}/{}{}",
            number_string(&record.thought_number),
            number_string(&record.total_thoughts),
            context
        );
        let header_width = label.chars().count() + rest.chars().count();
        let body_width = record.thought.chars().count();
        let inner = header_width.max(body_width);

        let prefix = if colorize { kind.paint(label) } else { label.to_string() };
        let border = "─".repeat(inner + 2);

        format!(
            "\n┌{border}┐\n│ {prefix}{rest}{hpad} │\n├{border}┤\n│ {body}{bpad} │\n└{border}┘",
            hpad = " ".repeat(inner - header_width),
            body = record.thought,
            bpad = " ".repeat(inner - body_width),
        )
    }
}

fn display_or_unknown(value: Option<&Value>) -> String {
    value.map_or_else(|| "?".to_string(), js_string)
}
