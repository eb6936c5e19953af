use std::path::PathBuf;

use eyre::{Result, eyre};

use crate::openai::DEFAULT_API_BASE;

/// File name of the config record, same as the package name.
pub const RECORD_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct SettingsFlags {
	/// Use this file as the config record instead of the per-user default
	#[cfg_attr(feature = "cli", arg(long, global = true, env = "ASK_GPT_CONFIG"))]
	pub config: Option<PathBuf>,
	/// Base url of the OpenAI-compatible api
	#[cfg_attr(feature = "cli", arg(long, global = true, env = "OPENAI_API_BASE"))]
	pub api_base: Option<String>,
}

/// Where things live for this invocation. Resolved once at startup, never written back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
	pub store_path: PathBuf,
	pub api_base: String,
}
impl Settings {
	pub fn resolve(flags: SettingsFlags) -> Result<Self> {
		let store_path = match flags.config {
			Some(path) => path,
			None => default_store_path()?,
		};
		Ok(Self {
			store_path,
			api_base: flags.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_owned()),
		})
	}
}

/// `<user config dir>/configstore/ask_gpt.json`
pub fn default_store_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or_else(|| eyre!("Could not determine the user config directory"))?;
	Ok(config_dir.join("configstore").join(format!("{RECORD_NAME}.json")))
}
