use tabled::Tabled;

use crate::client::GitHubClient;
use crate::config::ProjectRef;
use crate::error::Result;
use crate::output;
use crate::project;
use crate::types::ProjectField;

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    data_type: String,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&ProjectField> for FieldRow {
    fn from(field: &ProjectField) -> Self {
        Self {
            name: field.name.clone(),
            data_type: field.data_type.to_lowercase(),
            options: field
                .options
                .iter()
                .map(|option| option.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            id: field.id.clone(),
        }
    }
}

pub async fn list(client: &GitHubClient, target: &ProjectRef) -> Result<()> {
    let fields = project::fields(client, &target.org, target.number).await?;

    output::print_table(&fields, |f| FieldRow::from(f));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldOption;

    #[test]
    fn test_field_row_joins_options() {
        let field = ProjectField {
            id: "F_prio".to_string(),
            name: "Priority".to_string(),
            data_type: "SINGLE_SELECT".to_string(),
            options: vec![
                FieldOption {
                    id: "p1".to_string(),
                    name: "1 - Low".to_string(),
                },
                FieldOption {
                    id: "p3".to_string(),
                    name: "3 - High".to_string(),
                },
            ],
        };
        let row = FieldRow::from(&field);
        assert_eq!(row.data_type, "single_select");
        assert_eq!(row.options, "1 - Low, 3 - High");
    }
}
