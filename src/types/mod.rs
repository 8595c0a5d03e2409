mod field;
mod item;

pub use field::{FieldOption, ProjectField};
pub use item::{ProjectItem, SingleSelectValue};
