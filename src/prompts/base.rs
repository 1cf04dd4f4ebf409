//! Base prompt template trait
//!
//! This module defines the core trait for all prompt templates, plus the
//! f-string helpers used to substitute `{variable}` placeholders.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::prompt_values::PromptValue;

/// Base trait for all prompt templates
///
/// A prompt template takes a dictionary of inputs and produces a
/// [`PromptValue`]. `format_prompt` is async because selector-backed
/// templates retrieve examples while formatting.
#[async_trait]
pub trait BasePromptTemplate: Send + Sync {
    /// Get the input variables required by this template
    fn input_variables(&self) -> &[String];

    /// Get the optional variables for this template
    fn optional_variables(&self) -> &[String] {
        &[]
    }

    /// Get the partial variables (pre-filled values)
    fn partial_variables(&self) -> &HashMap<String, String>;

    /// Format the prompt with the given inputs
    ///
    /// This returns a [`PromptValue`] that can be used with language models.
    async fn format_prompt(&self, inputs: &HashMap<String, String>) -> Result<Box<dyn PromptValue>>;

    /// Validate that the template has all required variables
    fn validate_inputs(&self, inputs: &HashMap<String, String>) -> Result<()> {
        let provided_keys: std::collections::HashSet<_> = inputs.keys().collect();
        let required_keys: std::collections::HashSet<_> = self.input_variables().iter().collect();
        let optional_keys: std::collections::HashSet<_> =
            self.optional_variables().iter().collect();
        let partial_keys: std::collections::HashSet<_> = self.partial_variables().keys().collect();

        // Check for missing required variables (excluding optional and partial)
        let mut missing: Vec<_> = required_keys
            .difference(&provided_keys)
            .filter(|k| !optional_keys.contains(*k) && !partial_keys.contains(*k))
            .map(|k| (*k).clone())
            .collect();

        if !missing.is_empty() {
            missing.sort();
            return Err(Error::InvalidInput(format!(
                "Missing required input variables: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Merge provided inputs with partial variables
    fn merge_inputs(&self, inputs: &HashMap<String, String>) -> HashMap<String, String> {
        let partials = self.partial_variables();
        let mut merged = HashMap::with_capacity(partials.len() + inputs.len());

        for (k, v) in partials {
            merged.insert(k.clone(), v.clone());
        }

        // Inputs overwrite partials with the same key
        for (k, v) in inputs {
            merged.insert(k.clone(), v.clone());
        }

        merged
    }
}

/// Extract variables from an f-string template
///
/// Finds all {variable} patterns in the template.
#[must_use]
pub fn extract_fstring_variables(template: &str) -> Vec<String> {
    #[allow(clippy::expect_used)]
    let re = regex::Regex::new(r"\{([^{}]+)\}").expect("static fstring variable regex pattern");
    let mut variables = Vec::new();

    for cap in re.captures_iter(template) {
        if let Some(var) = cap.get(1) {
            let var_name = var.as_str();
            // Skip format specifiers like {name:10} -> just "name"
            let clean_var = var_name.split(':').next().unwrap_or(var_name);
            if !clean_var.is_empty() && !variables.contains(&clean_var.to_string()) {
                variables.push(clean_var.to_string());
            }
        }
    }

    variables
}

/// Format an f-string template with variables
pub fn format_fstring(template: &str, variables: &HashMap<String, String>) -> Result<String> {
    // Simple string replacement; unknown placeholders are kept as-is so
    // partial formatting stays possible (required variables are checked by
    // validate_inputs before this runs).
    let mut result = String::with_capacity(template.len());
    let mut remaining = template;

    while let Some(start) = remaining.find('{') {
        // Append everything before the '{'
        result.push_str(&remaining[..start]);
        remaining = &remaining[start..];

        // Find the closing '}'
        if let Some(end) = remaining.find('}') {
            let placeholder = &remaining[1..end];

            // Check for format specifier (e.g., "key:10")
            let key = placeholder
                .find(':')
                .map_or(placeholder, |pos| &placeholder[..pos]);

            if let Some(value) = variables.get(key) {
                result.push_str(value);
            } else {
                // Variable not found, keep the placeholder
                result.push_str(&remaining[..=end]);
            }

            remaining = &remaining[end + 1..];
        } else {
            // No closing brace, treat as literal
            result.push('{');
            remaining = &remaining[1..];
        }
    }

    result.push_str(remaining);

    Ok(result)
}
