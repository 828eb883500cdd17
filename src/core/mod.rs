pub mod fields;
pub mod types;

pub use fields::ThesisField;
pub use types::*;
