// Adapters layer: concrete catalog readers and enrollment stores behind
// the domain ports.

pub mod catalog_rows;
pub mod csv_catalog;
pub mod file_store;
pub mod http_catalog;
pub mod memory;
