pub mod catalog;
pub mod station;
