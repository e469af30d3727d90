pub mod json;
pub mod validation;
