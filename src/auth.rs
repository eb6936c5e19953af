//! `config auth set|get|delete`

use std::io::Write;

use eyre::Result;

use crate::store::{Credentials, KeyValueStore};

pub const NOT_CONFIGURED: &str = "You have not set an OpenAI API key (see --help)";

pub fn set<S: KeyValueStore>(creds: &mut Credentials<S>, api_key: &str) -> Result<()> {
	creds.set(api_key)
}

/// Prints the key unmasked.
pub fn get<S: KeyValueStore>(creds: &Credentials<S>, out: &mut impl Write) -> Result<()> {
	match creds.get()? {
		Some(key) => writeln!(out, "{key}")?,
		None => writeln!(out, "{NOT_CONFIGURED}")?,
	}
	Ok(())
}

pub fn delete<S: KeyValueStore>(creds: &mut Credentials<S>, out: &mut impl Write) -> Result<()> {
	match creds.get()? {
		Some(_) => creds.delete()?,
		None => writeln!(out, "{NOT_CONFIGURED}")?,
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryStore;

	fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
		let mut buf = Vec::new();
		f(&mut buf).unwrap();
		String::from_utf8(buf).unwrap()
	}

	#[test]
	fn get_and_delete_when_unset() {
		let mut creds = Credentials::new(MemoryStore::default());
		assert_eq!(output(|out| get(&creds, out)), format!("{NOT_CONFIGURED}\n"));
		assert_eq!(output(|out| delete(&mut creds, out)), format!("{NOT_CONFIGURED}\n"));
	}

	#[test]
	fn set_get_delete() {
		let mut creds = Credentials::new(MemoryStore::default());
		set(&mut creds, "sk-abc123").unwrap();
		assert_eq!(output(|out| get(&creds, out)), "sk-abc123\n");

		assert_eq!(output(|out| delete(&mut creds, out)), "");
		assert_eq!(creds.get().unwrap(), None);
		assert_eq!(output(|out| get(&creds, out)), format!("{NOT_CONFIGURED}\n"));
	}
}
