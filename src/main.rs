use ask_gpt::{
	AskOptions, AskParams, CHAT_MODEL, auth,
	clipboard::SystemClipboard,
	config::{self, Settings},
	logging,
	openai::OpenAi,
	store::{Credentials, FileStore},
};
use clap::{Args, Parser, Subcommand};

const BANNER: &str = "\x1b[32m┌──────────────────────┐\n│                      │\n│   ChatGPT CLI tool   │\n│                      │\n└──────────────────────┘\x1b[0m";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, before_help = BANNER)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
	#[command(flatten)]
	settings: config::SettingsFlags,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Configuration options
	Config {
		#[command(subcommand)]
		command: ConfigCommands,
	},
	/// Ask a question to ChatGPT
	Ask(AskArgs),
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
	/// Authentication options
	Auth {
		#[command(subcommand)]
		command: AuthCommands,
	},
}

#[derive(Debug, Subcommand)]
enum AuthCommands {
	/// Set an OpenAI API key
	Set { api_key: String },
	/// Get an OpenAI API key
	Get,
	/// Delete an OpenAI API key
	Delete,
}

#[derive(Debug, Args)]
struct AskArgs {
	/// The question you want to ask
	#[arg(short, long)]
	question: String,
	/// The temperature you want to set
	#[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
	temperature: f64,
	/// The max. number of tokens you want to use
	#[arg(short, long, default_value_t = 256, value_parser = clap::value_parser!(u32).range(1..))]
	max_tokens: u32,
	/// The model you want to use
	#[arg(short = 'd', long, default_value = CHAT_MODEL)]
	model: String,
	/// Copy the output to the clipboard
	#[arg(long)]
	copy: bool,
}
impl From<AskArgs> for AskOptions {
	fn from(args: AskArgs) -> Self {
		AskOptions::new(AskParams::new(args.question, args.temperature, args.max_tokens, args.model), args.copy)
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
	color_eyre::install()?;
	logging::init();
	let cli = Cli::parse();

	let settings = Settings::resolve(cli.settings)?;
	tracing::debug!(?settings);
	let mut creds = Credentials::new(FileStore::new(&settings.store_path));
	let mut stdout = std::io::stdout().lock();

	match cli.command {
		Commands::Config {
			command: ConfigCommands::Auth { command },
		} => match command {
			AuthCommands::Set { api_key } => auth::set(&mut creds, &api_key)?,
			AuthCommands::Get => auth::get(&creds, &mut stdout)?,
			AuthCommands::Delete => auth::delete(&mut creds, &mut stdout)?,
		},
		Commands::Ask(args) => {
			let transport = OpenAi::new(settings.api_base);
			let outcome = ask_gpt::ask(&creds, &transport, &mut SystemClipboard::default(), args.into(), &mut stdout).await?;
			tracing::debug!(?outcome);
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory as _;

	use super::*;

	fn parse(args: &[&str]) -> Cli {
		Cli::try_parse_from(std::iter::once("ask_gpt").chain(args.iter().copied())).unwrap()
	}

	#[test]
	fn cli_is_well_formed() {
		Cli::command().debug_assert();
	}

	#[test]
	fn ask_defaults() {
		let Commands::Ask(args) = parse(&["ask", "-q", "hello"]).command else {
			panic!("expected ask");
		};
		let opts = AskOptions::from(args);
		assert_eq!(opts, AskOptions::new(AskParams::new("hello".into(), 0.5, 256, CHAT_MODEL.into()), false));
	}

	#[test]
	fn ask_long_flags() {
		let cli = parse(&["ask", "--question", "", "--temperature", "-0.2", "--max-tokens", "12", "--model", "text-davinci-003", "--copy"]);
		let Commands::Ask(args) = cli.command else {
			panic!("expected ask");
		};
		assert_eq!(
			AskOptions::from(args),
			AskOptions::new(AskParams::new(String::new(), -0.2, 12, "text-davinci-003".into()), true)
		);
	}

	#[test]
	fn ask_requires_question_and_positive_tokens() {
		assert!(Cli::try_parse_from(["ask_gpt", "ask"]).is_err());
		assert!(Cli::try_parse_from(["ask_gpt", "ask", "-q", "hi", "-m", "0"]).is_err());
		assert!(Cli::try_parse_from(["ask_gpt", "ask", "-q", "hi", "-m", "lots"]).is_err());
	}

	#[test]
	fn auth_subcommands() {
		assert!(matches!(
			parse(&["config", "auth", "set", "sk-123"]).command,
			Commands::Config { command: ConfigCommands::Auth { command: AuthCommands::Set { api_key } } } if api_key == "sk-123"
		));
		assert!(matches!(
			parse(&["config", "auth", "get"]).command,
			Commands::Config { command: ConfigCommands::Auth { command: AuthCommands::Get } }
		));
		assert!(matches!(
			parse(&["config", "auth", "delete"]).command,
			Commands::Config { command: ConfigCommands::Auth { command: AuthCommands::Delete } }
		));
		assert!(Cli::try_parse_from(["ask_gpt", "config", "auth", "set"]).is_err());
	}

	#[test]
	fn global_settings_after_subcommand() {
		let cli = parse(&["config", "auth", "get", "--config", "/tmp/ask.json", "--api-base", "http://localhost:1/v1"]);
		assert_eq!(cli.settings.config.as_deref(), Some(std::path::Path::new("/tmp/ask.json")));
		assert_eq!(cli.settings.api_base.as_deref(), Some("http://localhost:1/v1"));
	}
}
