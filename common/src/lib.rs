//! Types and pure logic shared by the backend service and the yew frontend.
//!
//! Everything here is free of I/O so both sides can run the same field
//! extraction, rendering and validation code.

pub mod fields;
pub mod form;
pub mod locale;
pub mod model;
pub mod render;
pub mod requests;
