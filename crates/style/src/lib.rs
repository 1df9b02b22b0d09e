pub mod dimension;
pub mod font;
pub mod page;
pub mod text;

pub use dimension::{Margins, PageSize, PageUnit};
pub use font::{FontSpec, FontStyle, FontWeight};
pub use page::{GeometryError, PageGeometry};
pub use text::TextAlign;
