use serde::Serialize;

/// The one model that goes through the chat-completions path. Also the default.
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Which of the two request/response shapes a model speaks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelFamily {
	Chat,
	LegacyCompletion,
}
impl ModelFamily {
	/// Exact string match against [CHAT_MODEL]; anything else, including typos and models that don't exist, is legacy.
	pub fn of(model: &str) -> Self {
		match model {
			CHAT_MODEL => Self::Chat,
			_ => Self::LegacyCompletion,
		}
	}
}

/// What the user asked for. Nothing here is validated locally, the remote end is the judge.
#[derive(Clone, Debug, PartialEq, derive_new::new)]
pub struct AskParams {
	pub question: String,
	pub temperature: f64,
	pub max_tokens: u32,
	pub model: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
	pub role: Role,
	pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
	pub model: String,
	pub messages: Vec<ChatMessage>,
	pub temperature: f64,
	pub max_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionRequest {
	pub model: String,
	pub prompt: String,
	pub temperature: f64,
	pub max_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiRequest {
	Chat(ChatRequest),
	Completion(CompletionRequest),
}
impl ApiRequest {
	/// Path relative to the api base.
	pub fn endpoint(&self) -> &'static str {
		match self {
			Self::Chat(_) => "chat/completions",
			Self::Completion(_) => "completions",
		}
	}

	pub fn family(&self) -> ModelFamily {
		match self {
			Self::Chat(_) => ModelFamily::Chat,
			Self::Completion(_) => ModelFamily::LegacyCompletion,
		}
	}

	pub fn model(&self) -> &str {
		match self {
			Self::Chat(r) => &r.model,
			Self::Completion(r) => &r.model,
		}
	}
}
impl From<AskParams> for ApiRequest {
	fn from(params: AskParams) -> Self {
		let AskParams {
			question,
			temperature,
			max_tokens,
			model,
		} = params;
		match ModelFamily::of(&model) {
			ModelFamily::Chat => Self::Chat(ChatRequest {
				model,
				messages: vec![ChatMessage { role: Role::User, content: question }],
				temperature,
				max_tokens,
			}),
			ModelFamily::LegacyCompletion => Self::Completion(CompletionRequest {
				model,
				prompt: question,
				temperature,
				max_tokens,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn family_is_plain_string_equality() {
		assert_eq!(ModelFamily::of("gpt-3.5-turbo"), ModelFamily::Chat);
		assert_eq!(ModelFamily::of("GPT-3.5-TURBO"), ModelFamily::LegacyCompletion);
		assert_eq!(ModelFamily::of("gpt-3.5-turbo "), ModelFamily::LegacyCompletion);
		assert_eq!(ModelFamily::of("text-davinci-003"), ModelFamily::LegacyCompletion);
		assert_eq!(ModelFamily::of("no-such-model"), ModelFamily::LegacyCompletion);
	}

	#[test]
	fn chat_model_builds_single_user_message() {
		let request = ApiRequest::from(AskParams::new("What is Rust?".into(), 1.25, 42, CHAT_MODEL.into()));
		assert_eq!(request.endpoint(), "chat/completions");
		assert_eq!(request.family(), ModelFamily::Chat);
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"model": "gpt-3.5-turbo",
				"messages": [{ "role": "user", "content": "What is Rust?" }],
				"temperature": 1.25,
				"max_tokens": 42
			})
		);
	}

	#[test]
	fn other_models_build_legacy_prompt() {
		let request = ApiRequest::from(AskParams::new("Say hi".into(), -0.5, 7, "text-davinci-003".into()));
		assert_eq!(request.endpoint(), "completions");
		assert_eq!(request.model(), "text-davinci-003");
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"model": "text-davinci-003",
				"prompt": "Say hi",
				"temperature": -0.5,
				"max_tokens": 7
			})
		);
	}

	#[test]
	fn empty_question_passes_through() {
		let ApiRequest::Chat(chat) = ApiRequest::from(AskParams::new(String::new(), 0.5, 256, CHAT_MODEL.into())) else {
			panic!("expected chat request");
		};
		assert_eq!(chat.messages, vec![ChatMessage { role: Role::User, content: String::new() }]);
	}
}
