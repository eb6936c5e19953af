use async_trait::async_trait;
use reqwest::{
	StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::AskError, request::ApiRequest};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Sends one request, returns the 2xx body undecoded. Shape decoding is the caller's business.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, api_key: &str, request: &ApiRequest) -> Result<Value, AskError>;
}

#[derive(Clone, Debug)]
pub struct OpenAi {
	client: reqwest::Client,
	api_base: String,
}
impl Default for OpenAi {
	fn default() -> Self {
		Self::new(DEFAULT_API_BASE)
	}
}
impl OpenAi {
	pub fn new(api_base: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			api_base: api_base.into(),
		}
	}

	pub fn url(&self, request: &ApiRequest) -> String {
		format!("{}/{}", self.api_base.trim_end_matches('/'), request.endpoint())
	}
}

///docs: https://platform.openai.com/docs/api-reference/chat/create , https://platform.openai.com/docs/api-reference/completions/create
#[async_trait]
impl Transport for OpenAi {
	async fn send(&self, api_key: &str, request: &ApiRequest) -> Result<Value, AskError> {
		let url = self.url(request);

		// Header {{{
		let mut headers = HeaderMap::new();
		let bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| AskError::InvalidApiKey)?;
		headers.insert(AUTHORIZATION, bearer);
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		//,}}}

		tracing::info!(%url, model = request.model(), "sending request");
		tracing::debug!(payload = ?request);
		let response = self.client.post(&url).headers(headers).json(request).send().await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await?;
			tracing::debug!(%status, body);
			return Err(remote_error(status, &body));
		}
		let body = response.bytes().await?;
		serde_json::from_slice::<Value>(&body).map_err(|e| AskError::unexpected_shape(format!("response body is not JSON: {e}")))
	}
}

/// Turns a non-2xx body into the message the service meant for a human.
pub fn remote_error(status: StatusCode, body: &str) -> AskError {
	#[derive(Deserialize)]
	struct ErrorEnvelope {
		error: ErrorBody,
	}
	#[derive(Deserialize)]
	struct ErrorBody {
		message: String,
	}

	match serde_json::from_str::<ErrorEnvelope>(body) {
		Ok(envelope) => AskError::remote(envelope.error.message),
		Err(_) => AskError::remote(format!("{status}: {}", body.trim())),
	}
}
