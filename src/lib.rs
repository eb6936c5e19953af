//! Ask ChatGPT a question from the terminal.
//!
//! The api key lives in a small JSON record ([store::FileStore]); [ask::ask] builds one request per question,
//! picking the chat or the legacy completion shape by model name ([request::ModelFamily]).

pub mod ask;
pub mod auth;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod openai;
pub mod request;
pub mod response;
pub mod store;

pub use ask::{AskOptions, AskOutcome, ask};
pub use error::AskError;
pub use request::{AskParams, CHAT_MODEL};
