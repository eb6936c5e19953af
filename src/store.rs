use std::{
	collections::HashMap,
	fs,
	io::{ErrorKind, Write as _},
	path::{Path, PathBuf},
};

use eyre::{Result, WrapErr as _};
use serde_json::{Map, Value};

/// Key under which the api key lives in the config record.
pub const API_KEY: &str = "OPENAI_API_KEY";

/// Persistent string-to-string record. Absence of a key is a normal state, not an error.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Result<Option<String>>;
	fn set(&mut self, key: &str, value: &str) -> Result<()>;
	/// Removing a key that isn't there is a no-op.
	fn delete(&mut self, key: &str) -> Result<()>;
}

// FileStore {{{
/// A single JSON object on disk. Every call re-reads the file, so there is no cached state to go stale between commands.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
}
impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read(&self) -> Result<Map<String, Value>> {
		let contents = match fs::read_to_string(&self.path) {
			Ok(s) => s,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
			Err(e) => return Err(e).wrap_err_with(|| format!("Failed to read config record at {}", self.path.display())),
		};
		if contents.trim().is_empty() {
			return Ok(Map::new());
		}
		serde_json::from_str(&contents).wrap_err_with(|| format!("Config record at {} is not a JSON object", self.path.display()))
	}

	/// Writes to a sibling temp file and renames it over the record, so a failed write leaves the old record intact.
	fn write(&self, record: &Map<String, Value>) -> Result<()> {
		let dir = match self.path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p,
			_ => Path::new("."),
		};
		fs::create_dir_all(dir).wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
		let serialized = serde_json::to_string_pretty(record)?;

		let mut tmp = tempfile::NamedTempFile::new_in(dir).wrap_err_with(|| format!("Failed to create a temp file in {}", dir.display()))?;
		tmp.write_all(serialized.as_bytes())?;
		tmp.write_all(b"\n")?;
		tmp.as_file().sync_all()?;
		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt as _;
			fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
		}
		tmp.persist(&self.path)
			.map_err(|e| e.error)
			.wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;
		tracing::debug!(path = %self.path.display(), keys = record.len(), "wrote config record");
		Ok(())
	}
}
impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(match self.read()?.remove(key) {
			Some(Value::String(s)) => Some(s),
			Some(Value::Null) | None => None,
			Some(other) => Some(other.to_string()),
		})
	}

	fn set(&mut self, key: &str, value: &str) -> Result<()> {
		let mut record = self.read()?;
		record.insert(key.to_owned(), Value::String(value.to_owned()));
		self.write(&record)
	}

	fn delete(&mut self, key: &str) -> Result<()> {
		let mut record = self.read()?;
		if record.remove(key).is_some() {
			self.write(&record)?;
		}
		Ok(())
	}
}
//,}}}

/// In-memory stand-in for [FileStore].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(pub HashMap<String, String>);
impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(self.0.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<()> {
		self.0.insert(key.to_owned(), value.to_owned());
		Ok(())
	}

	fn delete(&mut self, key: &str) -> Result<()> {
		self.0.remove(key);
		Ok(())
	}
}

/// The api key, as seen through whichever [KeyValueStore] backs it.
#[derive(Debug)]
pub struct Credentials<S> {
	store: S,
}
impl<S: KeyValueStore> Credentials<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	pub fn get(&self) -> Result<Option<String>> {
		self.store.get(API_KEY)
	}

	/// Last write wins; the value is stored as given.
	pub fn set(&mut self, api_key: &str) -> Result<()> {
		self.store.set(API_KEY, api_key)
	}

	pub fn delete(&mut self) -> Result<()> {
		self.store.delete(API_KEY)
	}
}
