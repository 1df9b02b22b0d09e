pub mod wrapper;

pub use wrapper::{ELLIPSIS, truncate_with_ellipsis, wrap_words};
