pub mod field_path;
pub mod patch;
pub mod profile;
