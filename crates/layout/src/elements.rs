//! Draw instructions: the positioned output handed to a rendering backend.

use fleetprint_style::{FontSpec, TextAlign};
use fleetprint_types::Rect;
use serde::Serialize;
use std::ops::Range;

/// What part of the document a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "kebab-case")]
pub enum CellRole {
    Title,
    ReportDate,
    /// Column header; the value is the column index.
    Header(usize),
    /// Body cell; the value is the row index in the source table.
    Body(usize),
    Footer,
    /// Summary section heading; the value is the section index.
    SectionHeading(usize),
    /// One line of a summary section; the value is the section index.
    SectionLine(usize),
    Label,
    Value,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DrawInstruction {
    /// A stroked rectangle with no text.
    Rect { rect: Rect },
    /// Text placed in a box, optionally bordered.
    Cell {
        rect: Rect,
        text: String,
        align: TextAlign,
        font: FontSpec,
        border: bool,
        role: CellRole,
    },
    /// Text with its top-left corner at a point.
    Text { x: f32, y: f32, text: String, font: FontSpec },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl DrawInstruction {
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawInstruction::Cell { text, .. } | DrawInstruction::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<CellRole> {
        match self {
            DrawInstruction::Cell { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Lowest y coordinate of the instruction's box. Plain text reports its anchor.
    pub fn bottom(&self) -> f32 {
        match self {
            DrawInstruction::Rect { rect } | DrawInstruction::Cell { rect, .. } => rect.bottom(),
            DrawInstruction::Text { y, .. } => *y,
            DrawInstruction::Line { y1, y2, .. } => y1.max(*y2),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            DrawInstruction::Cell { text, .. } | DrawInstruction::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// One finished page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based position in the document.
    pub index: usize,
    /// Source table rows drawn on this page.
    pub rows: Range<usize>,
    pub instructions: Vec<DrawInstruction>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            rows: 0..0,
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, instruction: DrawInstruction) {
        self.instructions.push(instruction);
    }

    pub fn cells_with_role(&self, role: CellRole) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions.iter().filter(move |i| i.role() == Some(role))
    }

    /// Header texts in column order.
    pub fn header_texts(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter(|i| matches!(i.role(), Some(CellRole::Header(_))))
            .filter_map(DrawInstruction::text)
            .collect()
    }

    /// Row indices of the body cells in emission order, one entry per row.
    pub fn body_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = Vec::new();
        for i in &self.instructions {
            if let Some(CellRole::Body(row)) = i.role()
                && rows.last() != Some(&row)
            {
                rows.push(row);
            }
        }
        rows
    }

    /// Replaces `token` in the text of every cell with `role`.
    pub(crate) fn substitute(&mut self, role: CellRole, token: &str, value: &str) {
        for instruction in &mut self.instructions {
            if instruction.role() != Some(role) {
                continue;
            }
            if let Some(text) = instruction.text_mut()
                && text.contains(token)
            {
                *text = text.replace(token, value);
            }
        }
    }
}
