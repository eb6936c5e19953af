use serde::Deserialize;
use serde_json::Value;

use crate::{
	error::AskError,
	request::{ApiRequest, ModelFamily},
};

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
	pub choices: Vec<ChatChoice>,
}
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
	pub message: ChatChoiceMessage,
}
#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
	pub content: Option<String>,
}
impl ChatCompletionResponse {
	pub fn text(&self) -> Result<String, AskError> {
		let choice = self.choices.first().ok_or_else(|| AskError::unexpected_shape("chat completion has no choices"))?;
		let content = choice
			.message
			.content
			.as_deref()
			.ok_or_else(|| AskError::unexpected_shape("first chat choice has no message content"))?;
		Ok(content.trim().to_owned())
	}
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
	pub choices: Vec<CompletionChoice>,
}
#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
	pub text: String,
}
impl CompletionResponse {
	pub fn text(&self) -> Result<String, AskError> {
		let choice = self.choices.first().ok_or_else(|| AskError::unexpected_shape("completion has no choices"))?;
		Ok(choice.text.trim().to_owned())
	}
}

/// Pulls the generated text out of a 2xx body, reading it as the shape `family` answers with.
pub fn extract(family: ModelFamily, value: Value) -> Result<String, AskError> {
	tracing::debug!(?family, ?value);
	match family {
		ModelFamily::Chat => serde_json::from_value::<ChatCompletionResponse>(value)
			.map_err(|e| AskError::unexpected_shape(format!("not a chat completion: {e}")))?
			.text(),
		ModelFamily::LegacyCompletion => serde_json::from_value::<CompletionResponse>(value)
			.map_err(|e| AskError::unexpected_shape(format!("not a completion: {e}")))?
			.text(),
	}
}

impl ApiRequest {
	pub fn extract(&self, value: Value) -> Result<String, AskError> {
		extract(self.family(), value)
	}
}
