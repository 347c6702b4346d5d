pub mod active;
pub mod list;
pub mod options;
