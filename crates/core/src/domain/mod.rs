pub mod catalog;
pub mod number;
pub mod sale;
