use std::{io::Write, time::Duration};

use colored::Colorize as _;
use eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
	auth::NOT_CONFIGURED,
	clipboard::ClipboardSink,
	openai::Transport,
	request::{ApiRequest, AskParams},
	store::{Credentials, KeyValueStore},
};

#[derive(Clone, Debug, PartialEq, derive_new::new)]
pub struct AskOptions {
	pub params: AskParams,
	/// Also put the answer on the clipboard.
	pub copy: bool,
}

/// How an `ask` ended. All three are normal terminations as far as the process is concerned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AskOutcome {
	NotConfigured,
	Answered(String),
	/// Carries the message as printed, without the `openai error: ` prefix.
	Failed(String),
}

/// Checks for a key, sends one request, prints (and maybe copies) the answer.
///
/// Remote and network failures are printed and reported as [AskOutcome::Failed]. Only local faults
/// (store I/O, clipboard, an unusable key, a 2xx body of the wrong shape) come back as `Err`.
pub async fn ask<S, T, C, W>(creds: &Credentials<S>, transport: &T, clipboard: &mut C, opts: AskOptions, out: &mut W) -> Result<AskOutcome>
where
	S: KeyValueStore,
	T: Transport + ?Sized,
	C: ClipboardSink + ?Sized,
	W: Write + ?Sized, {
	let Some(api_key) = creds.get()? else {
		writeln!(out, "{NOT_CONFIGURED}")?;
		return Ok(AskOutcome::NotConfigured);
	};

	let request = ApiRequest::from(opts.params);
	let spinner = spinner();
	let sent = transport.send(&api_key, &request).await;
	spinner.finish_and_clear();

	let value = match sent {
		Ok(v) => v,
		Err(e) if e.is_reportable() => {
			tracing::warn!(error = %e, "request failed");
			let message = e.to_string();
			writeln!(out, "{}", format!("openai error: {message}").red())?;
			return Ok(AskOutcome::Failed(message));
		}
		Err(e) => return Err(e.into()),
	};

	let text = request.extract(value)?;
	writeln!(out, "{}", text.green())?;
	if opts.copy {
		clipboard.write_text(&text)?;
	}
	Ok(AskOutcome::Answered(text))
}

fn spinner() -> ProgressBar {
	let spinner = ProgressBar::new_spinner();
	if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
		spinner.set_style(style);
	}
	spinner.set_message("Asking ChatGPT...");
	spinner.enable_steady_tick(Duration::from_millis(80));
	spinner
}
