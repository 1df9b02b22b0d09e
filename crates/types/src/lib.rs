pub mod error;
pub mod format;
pub mod geometry;
pub mod table;
pub mod value;

pub use error::TableError;
pub use format::DigitGrouping;
pub use geometry::{Point, Rect, Size};
pub use table::{Cell, Column, ColumnType, Row, Table, SERIAL_COLUMN};
pub use value::CellValue;
