pub mod pagination;
pub mod row_height;
pub mod table_solver;
