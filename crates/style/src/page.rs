//! Immutable page configuration for one layout run.

use crate::dimension::{Margins, PageSize, PageUnit};
use crate::font::FontSpec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Usable width is {0:.2} after margins; it must be positive.")]
    NoUsableWidth(f32),
    #[error("Usable height is {0:.2} after margins; it must be positive.")]
    NoUsableHeight(f32),
    #[error("Geometry value '{name}' must be a positive finite number, got {value}.")]
    InvalidValue { name: &'static str, value: f32 },
}

/// Page size, margins, minimum column width and default fonts.
///
/// All lengths are in [`PageUnit`]s; font sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub min_col_width: f32,
    pub header_font_size: f32,
    pub body_font_size: f32,
    #[serde(default = "default_family")]
    pub font_family: String,
    #[serde(default)]
    pub unit: PageUnit,
}

fn default_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 portrait in millimetres with 10 mm side/top margins and a 20 mm bottom margin.
    pub fn a4() -> Self {
        Self::from_page_size(PageSize::A4, PageUnit::Mm)
    }

    /// Builds a geometry for a named page size, scaling the millimetre defaults into `unit`.
    pub fn from_page_size(size: PageSize, unit: PageUnit) -> Self {
        let (page_width, page_height) = size.dimensions_in(unit);
        let mm = |v: f32| match unit {
            PageUnit::Mm => v,
            PageUnit::Pt => v * crate::dimension::PT_PER_MM,
        };
        Self {
            page_width,
            page_height,
            margins: Margins::new(mm(10.0), mm(10.0), mm(20.0), mm(10.0)),
            min_col_width: mm(15.0),
            header_font_size: 10.0,
            body_font_size: 10.0,
            font_family: default_family(),
            unit,
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_min_col_width(mut self, width: f32) -> Self {
        self.min_col_width = width;
        self
    }

    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margins.horizontal()
    }

    pub fn usable_height(&self) -> f32 {
        self.page_height - self.margins.vertical()
    }

    /// The y coordinate rows may not cross.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    /// Converts a point size into page units.
    pub fn pt_to_unit(&self, pt: f32) -> f32 {
        self.unit.scale_pt(pt)
    }

    pub fn header_font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.header_font_size).bold()
    }

    pub fn body_font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.body_font_size)
    }

    /// Rejects geometries that leave no room to lay anything out.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let checks = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("header_font_size", self.header_font_size),
            ("body_font_size", self.body_font_size),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidValue { name, value });
            }
        }
        if !self.min_col_width.is_finite() || self.min_col_width < 0.0 {
            return Err(GeometryError::InvalidValue {
                name: "min_col_width",
                value: self.min_col_width,
            });
        }

        let usable_width = self.usable_width();
        if usable_width.is_nan() || usable_width <= 0.0 {
            return Err(GeometryError::NoUsableWidth(usable_width));
        }
        let usable_height = self.usable_height();
        if usable_height.is_nan() || usable_height <= 0.0 {
            return Err(GeometryError::NoUsableHeight(usable_height));
        }
        Ok(())
    }
}
