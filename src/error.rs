/// Failures of a single `ask` round-trip.
///
/// `Remote` and `Transport` are expected failures: they are printed and the command ends normally.
/// `UnexpectedShape` means the service answered 2xx with a payload we can't read, and `InvalidApiKey` is a local
/// problem with the stored key. Both are left to propagate.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AskError {
	#[display("{message}")]
	Remote { message: String },
	#[from]
	#[display("{_0}")]
	Transport(#[error(source)] reqwest::Error),
	#[display("unexpected response shape: {reason}")]
	UnexpectedShape { reason: String },
	#[display("stored API key contains characters not allowed in an HTTP header")]
	InvalidApiKey,
}
impl AskError {
	pub fn remote(message: impl Into<String>) -> Self {
		Self::Remote { message: message.into() }
	}

	pub fn unexpected_shape(reason: impl Into<String>) -> Self {
		Self::UnexpectedShape { reason: reason.into() }
	}

	/// Whether the command should report this and carry on, rather than abort.
	pub fn is_reportable(&self) -> bool {
		matches!(self, Self::Remote { .. } | Self::Transport(_))
	}
}
