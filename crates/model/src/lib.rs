pub mod catalog;
pub mod feed;
pub mod id;
pub mod operator;
pub mod station;
pub mod translation;
