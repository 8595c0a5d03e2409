use serde::{Deserialize, Serialize};

/// A card on the project board.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProjectItem {
    pub id: String,
    pub title: Option<String>,
    pub values: Vec<SingleSelectValue>,
}

/// The option selected for one single-select field on an item.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SingleSelectValue {
    pub field_id: String,
    pub option_id: String,
}
