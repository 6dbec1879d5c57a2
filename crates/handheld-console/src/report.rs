//! Rendering of the console answers.

use handheld_core::{OutputFormat, Result};
use handheld_vm::Fix;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixReport {
    pub accumulator: i64,
    pub index: usize,
    pub original: String,
    pub replacement: String,
    pub candidates_tried: usize,
}

impl From<Fix> for FixReport {
    fn from(fix: Fix) -> Self {
        Self {
            accumulator: fix.accumulator,
            index: fix.index,
            original: fix.original.to_string(),
            replacement: fix.replacement.to_string(),
            candidates_tried: fix.candidates_tried,
        }
    }
}

/// Answers for one program. A part that was not requested is left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_one: Option<PartOne>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_two: Option<FixReport>,
}

/// Accumulator when the unmodified program first revisits a position;
/// `None` when it terminates cleanly instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PartOne(pub Option<i64>);

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(PartOne(value)) = self.part_one {
            match value {
                Some(accumulator) => out.push_str(&format!("part one: {}\n", accumulator)),
                None => out.push_str("part one: none\n"),
            }
        }
        if let Some(fix) = &self.part_two {
            out.push_str(&format!(
                "part two: {} (flipped {} at {})\n",
                fix.accumulator, fix.original, fix.index
            ));
        }
        out
    }
}
