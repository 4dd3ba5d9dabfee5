pub mod admin;
pub mod catalog;
pub mod dashboard;
pub mod editor;
pub mod form;
