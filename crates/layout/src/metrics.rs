use fleetprint_style::FontSpec;

/// Measures rendered text width in page units.
///
/// Implementations must be pure: the same text and font always give the same width.
/// Any `Fn(&str, &FontSpec) -> f32` closure is a valid provider.
pub trait TextMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &FontSpec) -> f32,
{
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        self(text, font)
    }
}
