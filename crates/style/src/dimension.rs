//! Page units, margins and page sizes.
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// The distance unit of a layout run. Every length in a geometry, and every width a
/// metrics provider returns, is expressed in this unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageUnit {
    #[default]
    Mm,
    Pt,
}

impl PageUnit {
    /// How many of this unit make up one typographic point.
    pub fn per_pt(self) -> f32 {
        match self {
            PageUnit::Mm => 1.0 / PT_PER_MM,
            PageUnit::Pt => 1.0,
        }
    }

    pub fn scale_pt(self, pt: f32) -> f32 {
        pt * self.per_pt()
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(PageUnit::Mm),
            "pt" => Ok(PageUnit::Pt),
            other => Err(format!("Unknown page unit: {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Parse a length with optional unit (e.g., "10pt", "5mm", "1in", "12") into `unit`.
    /// A bare number is taken to already be in `unit`.
    pub fn parse_length(input: &str, unit: PageUnit) -> Result<f32, String> {
        let input = input.trim();
        let number = |s: &str| {
            s.trim()
                .parse::<f32>()
                .map_err(|e| format!("Invalid number: {}", e))
        };

        if let Some(val) = input.strip_suffix("pt") {
            return number(val).map(|v| unit.scale_pt(v));
        }
        if let Some(val) = input.strip_suffix("in") {
            return number(val).map(|v| unit.scale_pt(v * 72.0));
        }
        if let Some(val) = input.strip_suffix("cm") {
            return number(val).map(|v| unit.scale_pt(v * 10.0 * PT_PER_MM));
        }
        if let Some(val) = input.strip_suffix("mm") {
            return number(val).map(|v| unit.scale_pt(v * PT_PER_MM));
        }

        number(input)
    }

    /// Parse CSS-style margin shorthand (1, 2, or 4 values) into `unit`.
    pub fn parse_shorthand(input: &str, unit: PageUnit) -> Result<Self, String> {
        let values = input
            .split_whitespace()
            .map(|part| Self::parse_length(part, unit))
            .collect::<Result<Vec<_>, _>>()?;

        match values.len() {
            1 => Ok(Margins::all(values[0])),
            2 => Ok(Margins {
                top: values[0],
                right: values[1],
                bottom: values[0],
                left: values[1],
            }),
            4 => Ok(Margins {
                top: values[0],
                right: values[1],
                bottom: values[2],
                left: values[3],
            }),
            _ => Err(format!(
                "Invalid margin shorthand: expected 1, 2, or 4 values, got {}",
                values.len()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    /// Dimensions in points.
    Custom { width: f32, height: f32 },
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    /// Page dimensions in `unit`. A4 in millimetres is exactly 210 x 297.
    pub fn dimensions_in(&self, unit: PageUnit) -> (f32, f32) {
        match (self, unit) {
            (PageSize::A4, PageUnit::Mm) => (210.0, 297.0),
            _ => {
                let (w, h) = self.dimensions_pt();
                (unit.scale_pt(w), unit.scale_pt(h))
            }
        }
    }

    /// Parse a page size name (e.g., "A4", "Letter", "Legal")
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
