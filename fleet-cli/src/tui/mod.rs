pub mod apps;
pub mod devices;
pub mod table;
