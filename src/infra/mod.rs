pub mod csv;
pub mod sqlite;
