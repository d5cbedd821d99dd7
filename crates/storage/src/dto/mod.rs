pub mod athlete;
pub mod report;
pub mod summary;
