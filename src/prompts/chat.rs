//! Chat prompt templates
//!
//! [`ChatPromptTemplate`] holds an ordered sequence of segments: static
//! messages, per-role message templates, placeholders, and nested few-shot
//! templates. Formatting flattens every segment in order into one message
//! list. Templates compose with `+`, and composition is associative: the
//! result is always the in-order concatenation of the segments.
//!
//! # Example
//!
//! ```rust
//! use promptkit::prompts::ChatPromptTemplate;
//! use std::collections::HashMap;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let template = ChatPromptTemplate::from_messages(vec![
//!     ("system", "You are a helpful assistant."),
//!     ("human", "Tell me about {topic}"),
//! ]).unwrap();
//!
//! let mut values = HashMap::new();
//! values.insert("topic".to_string(), "Rust programming".to_string());
//!
//! let messages = template.format_messages(&values).await.unwrap();
//! assert_eq!(messages.len(), 2);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::ops::Add;

use crate::error::{Error, Result};
use crate::messages::Message;
use crate::prompt_values::{ChatPromptValue, PromptValue};
use crate::prompts::base::BasePromptTemplate;
use crate::prompts::few_shot::FewShotChatMessagePromptTemplate;
use crate::prompts::string::PromptTemplate;

/// A role paired with a string template; formats to exactly one message.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    role: String,
    prompt: PromptTemplate,
}

impl MessageTemplate {
    /// Create a message template from a role string and template text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unknown roles.
    pub fn new(role: &str, template: impl Into<String>) -> Result<Self> {
        // Validate the role up front so formatting can't fail on it later
        let probe = Message::from_role(role, "")?;
        Ok(Self {
            role: probe.role().to_string(),
            prompt: PromptTemplate::from_template(template),
        })
    }

    /// The canonical role this template formats to.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Variables referenced by the template text.
    #[must_use]
    pub fn input_variables(&self) -> &[String] {
        self.prompt.input_variables()
    }

    /// Format to a single message.
    pub fn format(&self, inputs: &HashMap<String, String>) -> Result<Message> {
        let text = self.prompt.format(inputs)?;
        Message::from_role(&self.role, text)
    }
}

/// Placeholder for a dynamic message list.
///
/// Expanded from the input variable of the same name, whose value must be a
/// JSON-encoded array of messages. Optional placeholders expand to nothing
/// when the variable is absent.
#[derive(Debug, Clone)]
pub struct MessagesPlaceholder {
    variable_name: String,
    optional: bool,
}

impl MessagesPlaceholder {
    /// Create a required placeholder.
    pub fn new(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            optional: false,
        }
    }

    /// Create an optional placeholder.
    pub fn optional(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            optional: true,
        }
    }

    /// The input variable this placeholder reads.
    #[must_use]
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    fn format(&self, inputs: &HashMap<String, String>) -> Result<Vec<Message>> {
        match inputs.get(&self.variable_name) {
            Some(value) => {
                let messages: Vec<Message> = serde_json::from_str(value)?;
                Ok(messages)
            }
            None if self.optional => Ok(Vec::new()),
            None => Err(Error::invalid_input(format!(
                "Missing required input variables: {}",
                self.variable_name
            ))),
        }
    }
}

/// One segment of a chat prompt template.
#[derive(Debug, Clone)]
enum MessageSegment {
    /// A message inserted verbatim
    Static(Message),
    /// A role + template formatted per input
    Template(MessageTemplate),
    /// A dynamic message list
    Placeholder(MessagesPlaceholder),
    /// A nested few-shot block
    FewShot(Box<FewShotChatMessagePromptTemplate>),
}

/// Chat template with multiple message roles.
///
/// Formatting is a pure function of the inputs: segments are formatted
/// independently and concatenated in order. The only error conditions are
/// propagated formatting failures (missing variables, bad placeholder data).
#[derive(Debug, Clone, Default)]
pub struct ChatPromptTemplate {
    segments: Vec<MessageSegment>,
    input_variables: Vec<String>,
    partial_variables: HashMap<String, String>,
}

impl ChatPromptTemplate {
    /// Create an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a template from `(role, template)` pairs.
    ///
    /// Roles are `"system"`, `"human"`/`"user"` and `"ai"`/`"assistant"`.
    /// Template texts may reference `{variables}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unknown roles.
    pub fn from_messages(messages: Vec<(&str, &str)>) -> Result<Self> {
        let mut template = Self::new();
        for (role, text) in messages {
            template = template.with_template(MessageTemplate::new(role, text)?);
        }
        Ok(template)
    }

    /// Append a static message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.segments.push(MessageSegment::Static(message));
        self
    }

    /// Append a message template (builder pattern).
    #[must_use]
    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        for var in template.input_variables() {
            self.add_input_variable(var);
        }
        self.segments.push(MessageSegment::Template(template));
        self
    }

    /// Append a messages placeholder (builder pattern).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: MessagesPlaceholder) -> Self {
        if !placeholder.optional {
            self.add_input_variable(&placeholder.variable_name);
        }
        self.segments.push(MessageSegment::Placeholder(placeholder));
        self
    }

    /// Append a few-shot block (builder pattern).
    #[must_use]
    pub fn with_few_shot(mut self, few_shot: FewShotChatMessagePromptTemplate) -> Self {
        for var in few_shot.input_variables() {
            self.add_input_variable(var);
        }
        self.segments.push(MessageSegment::FewShot(Box::new(few_shot)));
        self
    }

    /// Pre-fill a variable (builder pattern).
    #[must_use]
    pub fn partial(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.partial_variables.insert(key.into(), value.into());
        self
    }

    fn add_input_variable(&mut self, var: &str) {
        if !self.input_variables.iter().any(|v| v == var) {
            self.input_variables.push(var.to_string());
        }
    }

    /// Number of segments in this template.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the template has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Format every segment in order and concatenate the results.
    ///
    /// # Errors
    ///
    /// Propagates formatting failures: missing required variables, unknown
    /// placeholder data, or example selection errors.
    pub async fn format_messages(
        &self,
        inputs: &HashMap<String, String>,
    ) -> Result<Vec<Message>> {
        let merged = self.merge_inputs(inputs);
        let mut messages = Vec::new();

        for segment in &self.segments {
            match segment {
                MessageSegment::Static(message) => messages.push(message.clone()),
                MessageSegment::Template(template) => messages.push(template.format(&merged)?),
                MessageSegment::Placeholder(placeholder) => {
                    messages.extend(placeholder.format(&merged)?);
                }
                MessageSegment::FewShot(few_shot) => {
                    messages.extend(few_shot.format_messages(&merged).await?);
                }
            }
        }

        Ok(messages)
    }
}

#[async_trait]
impl BasePromptTemplate for ChatPromptTemplate {
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
        let messages = self.format_messages(inputs).await?;
        Ok(Box::new(ChatPromptValue::new(messages)))
    }
}

impl Add for ChatPromptTemplate {
    type Output = ChatPromptTemplate;

    fn add(mut self, rhs: ChatPromptTemplate) -> Self::Output {
        for var in &rhs.input_variables {
            self.add_input_variable(var);
        }
        for (k, v) in rhs.partial_variables {
            self.partial_variables.entry(k).or_insert(v);
        }
        self.segments.extend(rhs.segments);
        self
    }
}

impl Add<Message> for ChatPromptTemplate {
    type Output = ChatPromptTemplate;

    fn add(self, rhs: Message) -> Self::Output {
        self.with_message(rhs)
    }
}

impl Add<FewShotChatMessagePromptTemplate> for ChatPromptTemplate {
    type Output = ChatPromptTemplate;

    fn add(self, rhs: FewShotChatMessagePromptTemplate) -> Self::Output {
        self.with_few_shot(rhs)
    }
}

impl From<Message> for ChatPromptTemplate {
    fn from(message: Message) -> Self {
        ChatPromptTemplate::new().with_message(message)
    }
}

impl From<FewShotChatMessagePromptTemplate> for ChatPromptTemplate {
    fn from(few_shot: FewShotChatMessagePromptTemplate) -> Self {
        ChatPromptTemplate::new().with_few_shot(few_shot)
    }
}
