use serde::{Deserialize, Serialize};

/// A project field. Only single-select fields carry options.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProjectField {
    pub id: String,
    pub name: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FieldOption {
    pub id: String,
    pub name: String,
}

impl ProjectField {
    pub fn is_single_select(&self) -> bool {
        self.data_type == "SINGLE_SELECT"
    }

    pub fn is_number(&self) -> bool {
        self.data_type == "NUMBER"
    }
}
