pub mod category;
pub mod document;
pub mod field;
pub mod profile;
pub mod saved_form;
pub mod template;

use std::collections::HashMap;

/// Transient mapping from field identifier to the submitted string value.
pub type FieldValues = HashMap<String, String>;
