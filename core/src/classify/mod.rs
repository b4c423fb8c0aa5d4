mod layout;
mod row;

pub use layout::{cell, default_catch_all, CategorySet, ColumnLayout};
pub use row::{classify_row, classify_rows, parse_due_date, RowContext};
