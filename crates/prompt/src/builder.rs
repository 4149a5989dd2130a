//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use pricelens_core::{AppError, AppResult};
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Renders the system template (when present) and the user template with the
/// same variables, and carries the definition's sampling parameters along.
///
/// # Example
/// ```no_run
/// use pricelens_prompt::{build_prompt, builtin_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = builtin_prompt("chat")?;
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "Which retailer is cheapest?".to_string());
/// vars.insert("summary".to_string(), "{}".to_string());
///
/// let built = build_prompt(&def, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let system = definition
        .system
        .as_deref()
        .map(|template| render_template(template, &variables))
        .transpose()?
        .map(|s| s.trim_end().to_string());

    let user = render_template(&definition.template, &variables)?
        .trim_end()
        .to_string();

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.parameters,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Prompts are plain text; JSON payloads must pass through unescaped
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::builtin_prompt;
    use crate::types::{PromptOutputSpec, PromptParameters};

    fn create_test_definition(system: Option<&str>) -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            system: system.map(str::to_string),
            parameters: PromptParameters {
                temperature: 0.3,
                max_tokens: 100,
            },
            template: "Question: {{question}}".to_string(),
            output: PromptOutputSpec {
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{question}}", &vars).unwrap();
        assert_eq!(result, "Question: Hello, world!");
    }

    #[test]
    fn test_json_is_not_escaped() {
        let mut vars = HashMap::new();
        vars.insert("summary".to_string(), r#"{"A":{"avgPrice":2.5}}"#.to_string());

        let result = render_template("Data: {{summary}}", &vars).unwrap();
        assert_eq!(result, r#"Data: {"A":{"avgPrice":2.5}}"#);
    }

    #[test]
    fn test_build_prompt_without_system() {
        let def = create_test_definition(None);
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Test question".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(built.user, "Question: Test question");
        assert!(built.system.is_none());
        assert_eq!(built.parameters.max_tokens, 100);
    }

    #[test]
    fn test_build_prompt_with_system() {
        let def = create_test_definition(Some("Context: {{summary}}"));
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Q".to_string());
        vars.insert("summary".to_string(), "two retailers".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(built.system.as_deref(), Some("Context: two retailers"));
        assert_eq!(built.metadata.source_prompt_id, "test.prompt");
    }

    #[test]
    fn test_builtin_insights_renders_sections() {
        let def = builtin_prompt("insights").unwrap();
        let mut vars = HashMap::new();
        vars.insert("retailers".to_string(), "A, B".to_string());
        vars.insert(
            "sections".to_string(),
            "\"productAnalysis\": Brief product pricing analysis".to_string(),
        );

        let built = build_prompt(&def, vars).unwrap();
        assert!(built.user.contains("Retailers: A, B"));
        assert!(built.user.contains("\"productAnalysis\""));
        assert!(built.user.ends_with("minimize token usage."));
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Question: {{missing}}", &vars);
        // Handlebars renders missing variables as empty string
        assert_eq!(result.unwrap(), "Question: ");
    }
}
