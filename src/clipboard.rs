use eyre::{Result, eyre};

/// Where `--copy` sends the answer.
pub trait ClipboardSink {
	fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard. Opened lazily, so commands that never copy never touch the display server.
#[derive(Default)]
pub struct SystemClipboard {
	inner: Option<arboard::Clipboard>,
}
impl ClipboardSink for SystemClipboard {
	fn write_text(&mut self, text: &str) -> Result<()> {
		if self.inner.is_none() {
			self.inner = Some(arboard::Clipboard::new().map_err(|e| eyre!("Failed to access clipboard: {e}"))?);
		}
		let clipboard = self.inner.as_mut().ok_or_else(|| eyre!("Failed to access clipboard"))?;
		clipboard.set_text(text).map_err(|e| eyre!("Failed to copy to clipboard: {e}"))
	}
}

/// Remembers everything it was handed instead of touching the OS.
#[derive(Clone, Debug, Default)]
pub struct RecordingClipboard {
	pub writes: Vec<String>,
}
impl ClipboardSink for RecordingClipboard {
	fn write_text(&mut self, text: &str) -> Result<()> {
		self.writes.push(text.to_owned());
		Ok(())
	}
}
