use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::error::{Result, SyncError};

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Build a config from answers to the init prompts. Blank optional answers
/// are left unset.
fn config_from_answers(token: &str, organization: &str, project_number: &str) -> Result<Config> {
    if token.is_empty() {
        return Err(SyncError::MissingToken);
    }

    let project_number = if project_number.is_empty() {
        None
    } else {
        Some(
            project_number
                .parse::<u32>()
                .map_err(|_| SyncError::InvalidProjectNumber(project_number.to_string()))?,
        )
    };

    Ok(Config {
        token: Some(token.to_string()),
        organization: (!organization.is_empty()).then(|| organization.to_string()),
        project_number,
        ..Config::default()
    })
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("project-sync Configuration");
    println!("==========================\n");

    let token = prompt(
        &mut input,
        "Enter a GitHub token with read:org and project scopes: ",
    )?;
    let organization = prompt(&mut input, "Enter organization login [optional]: ")?;
    let project_number = prompt(&mut input, "Enter project number [optional]: ")?;

    let config = config_from_answers(&token, &organization, &project_number)?;
    config.save(&config_path)?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'project-sync' commands!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_answers() {
        let config = config_from_answers("ghp_x", "nextstrain", "7").unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_x"));
        assert_eq!(config.organization.as_deref(), Some("nextstrain"));
        assert_eq!(config.project_number, Some(7));
    }

    #[test]
    fn test_optional_answers_left_unset() {
        let config = config_from_answers("ghp_x", "", "").unwrap();
        assert!(config.organization.is_none());
        assert!(config.project_number.is_none());
    }

    #[test]
    fn test_invalid_answers() {
        assert!(matches!(
            config_from_answers("", "org", "1"),
            Err(SyncError::MissingToken)
        ));
        assert!(matches!(
            config_from_answers("ghp_x", "org", "seven"),
            Err(SyncError::InvalidProjectNumber(raw)) if raw == "seven"
        ));
    }

    #[test]
    fn test_prompt_trims_input() {
        let mut input = io::Cursor::new("  nextstrain \n7\n");
        assert_eq!(prompt(&mut input, "").unwrap(), "nextstrain");
        assert_eq!(prompt(&mut input, "").unwrap(), "7");
    }
}
