//! Prompt loader for YAML prompt definitions.
//!
//! Two definitions ship inside the binary. A workspace may replace either by
//! placing `<id>.yml` under `.pricelens/prompts/`, or add new ones there.

use crate::types::PromptDefinition;
use pricelens_core::{AppError, AppResult};
use std::path::Path;

/// Prompt used by the insight synthesizer.
pub const INSIGHTS_PROMPT_ID: &str = "insights";

/// Prompt used by the dialogue responder.
pub const CHAT_PROMPT_ID: &str = "chat";

const BUILTIN_PROMPTS: [(&str, &str); 2] = [
    (INSIGHTS_PROMPT_ID, include_str!("../prompts/insights.yml")),
    (CHAT_PROMPT_ID, include_str!("../prompts/chat.yml")),
];

/// Load a prompt definition by ID, preferring a workspace override.
///
/// # Arguments
/// * `workspace_path` - Root workspace directory that may contain `.pricelens/prompts/`
/// * `prompt_id` - Prompt identifier (e.g., "insights")
///
/// # Example
/// ```no_run
/// use pricelens_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "insights")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = workspace_path
        .join(".pricelens/prompts")
        .join(format!("{}.yml", prompt_id));

    if !prompt_file.exists() {
        return builtin_prompt(prompt_id);
    }

    tracing::debug!("Loading prompt override from: {:?}", prompt_file);

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition = parse_definition(&contents, &format!("{:?}", prompt_file))?;

    tracing::info!("Loaded prompt override: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load one of the prompt definitions compiled into the binary.
pub fn builtin_prompt(prompt_id: &str) -> AppResult<PromptDefinition> {
    let (_, contents) = BUILTIN_PROMPTS
        .iter()
        .find(|(id, _)| *id == prompt_id)
        .ok_or_else(|| AppError::Prompt(format!("Prompt not found: {}", prompt_id)))?;

    parse_definition(contents, prompt_id)
}

/// List all available prompt IDs: built-ins plus workspace overrides, sorted.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let mut prompt_ids: Vec<String> = BUILTIN_PROMPTS
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();

    let prompts_dir = workspace_path.join(".pricelens/prompts");

    if prompts_dir.exists() {
        for entry in walkdir::WalkDir::new(&prompts_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    prompt_ids.push(stem.to_string());
                }
            }
        }
    }

    prompt_ids.sort();
    prompt_ids.dedup();

    Ok(prompt_ids)
}

fn parse_definition(contents: &str, origin: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML {}: {}", origin, e)))?;

    validate_prompt(&definition)?;

    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if def.parameters.max_tokens == 0 {
        return Err(AppError::Prompt(format!(
            "Prompt {} must allow at least one output token",
            def.id
        )));
    }

    if !(0.0..=2.0).contains(&def.parameters.temperature) {
        return Err(AppError::Prompt(format!(
            "Prompt {} temperature {} is outside 0.0-2.0",
            def.id, def.parameters.temperature
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_prompt(dir: &Path, id: &str, valid: bool) -> PathBuf {
        let prompts_dir = dir.join(".pricelens/prompts");
        fs::create_dir_all(&prompts_dir).unwrap();

        let content = if valid {
            format!(
                r#"
id: {}
title: "Test Prompt"
apiVersion: "1.0"
parameters:
  temperature: 0.1
  maxTokens: 200
template: "Test template: {{{{question}}}}"
output:
  format: text
"#,
                id
            )
        } else {
            "invalid: yaml: content:".to_string()
        };

        let file_path = prompts_dir.join(format!("{}.yml", id));
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn test_builtin_insights_prompt() {
        let prompt = builtin_prompt(INSIGHTS_PROMPT_ID).unwrap();
        assert_eq!(prompt.id, "insights");
        assert_eq!(prompt.parameters.max_tokens, 800);
        assert!((prompt.parameters.temperature - 0.5).abs() < f32::EPSILON);
        assert!(prompt.template.contains("JSON format"));
    }

    #[test]
    fn test_builtin_chat_prompt() {
        let prompt = builtin_prompt(CHAT_PROMPT_ID).unwrap();
        assert_eq!(prompt.parameters.max_tokens, 500);
        assert!(prompt.system.unwrap().contains("{{summary}}"));
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = load_prompt(temp_dir.path(), CHAT_PROMPT_ID).unwrap();
        assert_eq!(prompt.id, "chat");
    }

    #[test]
    fn test_workspace_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "chat", true);

        let prompt = load_prompt(temp_dir.path(), "chat").unwrap();
        assert_eq!(prompt.title, "Test Prompt");
        assert_eq!(prompt.parameters.max_tokens, 200);
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_prompt(temp_dir.path(), "nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "invalid", false);

        let result = load_prompt(temp_dir.path(), "invalid");
        assert!(result.is_err());
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "chat", true);
        create_test_prompt(temp_dir.path(), "weekly", true);

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(prompts, vec!["chat", "insights", "weekly"]);
    }
}
