//! Built-in metrics for the standard PDF Type1 faces.
//!
//! Widths come from the Adobe AFM files in 1/1000 em and cover printable ASCII.
//! Other characters are measured with the face's typical lowercase width.

use crate::metrics::TextMetrics;
use fleetprint_style::{FontSpec, PageUnit};

const FIRST_CHAR: u32 = 32;

struct Face {
    name: &'static str,
    /// Widths for characters 32..=126.
    widths: &'static [u16; 95],
    fallback: u16,
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

static COURIER_WIDTHS: [u16; 95] = [600; 95];

static HELVETICA: Face = Face { name: "Helvetica", widths: &HELVETICA_WIDTHS, fallback: 556 };
static HELVETICA_BOLD: Face =
    Face { name: "Helvetica-Bold", widths: &HELVETICA_BOLD_WIDTHS, fallback: 611 };
static TIMES_ROMAN: Face = Face { name: "Times-Roman", widths: &TIMES_ROMAN_WIDTHS, fallback: 500 };
static TIMES_BOLD: Face = Face { name: "Times-Bold", widths: &TIMES_BOLD_WIDTHS, fallback: 500 };
static COURIER: Face = Face { name: "Courier", widths: &COURIER_WIDTHS, fallback: 600 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Helvetica,
    Times,
    Courier,
}

fn family_of(name: &str) -> Family {
    let lower = name.trim().to_ascii_lowercase();
    match lower.as_str() {
        "helvetica" | "arial" | "sans-serif" | "sans" => Family::Helvetica,
        "times" | "times-roman" | "times new roman" | "serif" => Family::Times,
        "courier" | "courier new" | "monospace" => Family::Courier,
        _ => {
            log::debug!("No built-in metrics for font family '{}', using Helvetica.", name);
            Family::Helvetica
        }
    }
}

fn face_for(font: &FontSpec) -> &'static Face {
    // Oblique and italic faces share the upright widths.
    match (family_of(&font.family), font.is_bold()) {
        (Family::Helvetica, false) => &HELVETICA,
        (Family::Helvetica, true) => &HELVETICA_BOLD,
        (Family::Times, false) => &TIMES_ROMAN,
        (Family::Times, true) => &TIMES_BOLD,
        (Family::Courier, _) => &COURIER,
    }
}

/// [`TextMetrics`] backed by the standard Type1 width tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardFontMetrics {
    unit: PageUnit,
}

impl StandardFontMetrics {
    pub fn new(unit: PageUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> PageUnit {
        self.unit
    }

    /// Name of the standard face used for `font`.
    pub fn face_name(font: &FontSpec) -> &'static str {
        face_for(font).name
    }

    /// Width of `text` in thousandths of an em.
    pub fn em_units(text: &str, font: &FontSpec) -> u64 {
        let face = face_for(font);
        text.chars()
            .map(|c| {
                let code = c as u32;
                match code.checked_sub(FIRST_CHAR) {
                    Some(i) if (i as usize) < face.widths.len() => u64::from(face.widths[i as usize]),
                    _ if c.is_control() => 0,
                    _ => u64::from(face.fallback),
                }
            })
            .sum()
    }
}

impl TextMetrics for StandardFontMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let points = Self::em_units(text, font) as f32 * font.size / 1000.0;
        self.unit.scale_pt(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_capital_a() {
        let metrics = StandardFontMetrics::new(PageUnit::Pt);
        let font = FontSpec::new("Helvetica", 10.0);
        assert_eq!(StandardFontMetrics::em_units("A", &font), 667);
        assert!((metrics.text_width("A", &font) - 6.67).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider_and_arial_is_helvetica() {
        let regular = FontSpec::new("Arial", 10.0);
        let bold = regular.clone().bold();
        assert_eq!(StandardFontMetrics::face_name(&regular), "Helvetica");
        assert_eq!(StandardFontMetrics::face_name(&bold), "Helvetica-Bold");
        assert!(
            StandardFontMetrics::em_units("Quantity", &bold)
                > StandardFontMetrics::em_units("Quantity", &regular)
        );
    }

    #[test]
    fn millimetres_and_fallbacks() {
        let metrics = StandardFontMetrics::new(PageUnit::Mm);
        let courier = FontSpec::new("Courier", 10.0);
        // 10 characters x 600/1000 em x 10 pt = 60 pt
        let mm = metrics.text_width("0123456789", &courier);
        assert!((mm - 60.0 / fleetprint_style::dimension::PT_PER_MM).abs() < 1e-3);

        let unknown = FontSpec::new("Comic Sans", 10.0);
        assert_eq!(StandardFontMetrics::face_name(&unknown), "Helvetica");
        assert_eq!(StandardFontMetrics::em_units("é", &unknown), 556);
        assert_eq!(StandardFontMetrics::em_units("", &unknown), 0);
    }

    #[test]
    fn very_long_text_does_not_overflow() {
        let font = FontSpec::new("Helvetica", 10.0);
        let text = "A".repeat(7_000_000);
        assert_eq!(StandardFontMetrics::em_units(&text, &font), 7_000_000 * 667);

        let width = StandardFontMetrics::new(PageUnit::Pt).text_width(&text, &font);
        assert!((width / 46_690_000.0 - 1.0).abs() < 1e-3);
    }
}
