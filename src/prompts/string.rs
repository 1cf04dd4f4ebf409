//! String prompt templates
//!
//! [`PromptTemplate`] substitutes `{variable}` placeholders in a single text
//! template. It is the per-field formatter used by
//! [`MessageTemplate`](crate::prompts::chat::MessageTemplate) to turn one
//! example field into message content.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::prompt_values::{PromptValue, StringPromptValue};
use crate::prompts::base::{extract_fstring_variables, format_fstring, BasePromptTemplate};

/// Simple string template with `{variable}` substitution.
///
/// # Example
///
/// ```rust
/// use promptkit::prompts::PromptTemplate;
/// use std::collections::HashMap;
///
/// let template = PromptTemplate::from_template("Tell me a joke about {topic}");
///
/// let mut values = HashMap::new();
/// values.insert("topic".to_string(), "rust".to_string());
///
/// let result = template.format(&values).unwrap();
/// assert_eq!(result, "Tell me a joke about rust");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Template text with `{variable}` placeholders
    template: String,

    /// Variables that must be provided when formatting
    input_variables: Vec<String>,

    /// Pre-filled values merged into every format call
    #[serde(default)]
    partial_variables: HashMap<String, String>,
}

impl PromptTemplate {
    /// Create a new template with an explicit variable list.
    pub fn new(template: impl Into<String>, input_variables: Vec<String>) -> Self {
        Self {
            template: template.into(),
            input_variables,
            partial_variables: HashMap::new(),
        }
    }

    /// Create a template, extracting input variables from the template text.
    pub fn from_template(template: impl Into<String>) -> Self {
        let template = template.into();
        let input_variables = extract_fstring_variables(&template);
        Self {
            template,
            input_variables,
            partial_variables: HashMap::new(),
        }
    }

    /// Get the template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Pre-fill a variable (builder pattern). Partial variables no longer
    /// need to be provided at format time.
    #[must_use]
    pub fn partial(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.partial_variables.insert(key.into(), value.into());
        self
    }

    /// Format the template with the given inputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) naming the
    /// missing variables if a required input is absent.
    pub fn format(&self, inputs: &HashMap<String, String>) -> Result<String> {
        self.validate_inputs(inputs)?;
        let merged = self.merge_inputs(inputs);
        format_fstring(&self.template, &merged)
    }
}

#[async_trait]
impl BasePromptTemplate for PromptTemplate {
    fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    fn partial_variables(&self) -> &HashMap<String, String> {
        &self.partial_variables
    }

    async fn format_prompt(
        &self,
        inputs: &HashMap<String, String>,
    ) -> Result<Box<dyn PromptValue>> {
        let text = self.format(inputs)?;
        Ok(Box::new(StringPromptValue::new(text)))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_template_extracts_variables() {
        let template = PromptTemplate::from_template("Hello {name}, welcome to {place}");
        assert_eq!(template.input_variables(), &["name", "place"]);
    }

    #[test]
    fn test_format() {
        let template = PromptTemplate::from_template("{a} + {b}");
        let result = template.format(&inputs(&[("a", "2"), ("b", "2")])).unwrap();
        assert_eq!(result, "2 + 2");
    }

    #[test]
    fn test_format_missing_variable() {
        let template = PromptTemplate::from_template("Hello {name}");
        let err = template.format(&HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_partial_variables() {
        let template = PromptTemplate::from_template("{greeting}, {name}!").partial("greeting", "Hello");
        let result = template.format(&inputs(&[("name", "Alice")])).unwrap();
        assert_eq!(result, "Hello, Alice!");
    }

    #[test]
    fn test_inputs_override_partials() {
        let template = PromptTemplate::from_template("{greeting}").partial("greeting", "Hello");
        let result = template.format(&inputs(&[("greeting", "Hi")])).unwrap();
        assert_eq!(result, "Hi");
    }

    #[test]
    fn test_no_variables() {
        let template = PromptTemplate::from_template("static text");
        assert!(template.input_variables().is_empty());
        assert_eq!(template.format(&HashMap::new()).unwrap(), "static text");
    }

    #[tokio::test]
    async fn test_format_prompt() {
        let template = PromptTemplate::from_template("Hello {name}");
        let value = template
            .format_prompt(&inputs(&[("name", "Bob")]))
            .await
            .unwrap();
        assert_eq!(value.to_string(), "Hello Bob");
        assert_eq!(value.to_messages().len(), 1);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let template = PromptTemplate::from_template("Hello {name}").partial("name", "x");
        let json = serde_json::to_string(&template).unwrap();
        let deserialized: PromptTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(template, deserialized);
    }
}
