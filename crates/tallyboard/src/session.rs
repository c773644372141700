//! Session storage and authentication state.
//!
//! The dashboard's notion of "logged in" is the existence of a single token
//! key in a local, synchronous key-value store. There is no expiry, no
//! validation, and no server round-trip. The store is `SQLite`-backed on disk
//! with an in-memory variant for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default key the session token is stored under.
pub const DEFAULT_TOKEN_KEY: &str = "session_token";

/// SQL statement to create the session table.
const CREATE_SESSION_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS session (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// A local, synchronous key-value store for session state.
pub trait SessionStore: Send {
    /// Get the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`.
    ///
    /// Returns `true` if a value was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn delete(&mut self, key: &str) -> Result<bool>;
}

/// `SQLite`-backed session store.
#[derive(Debug)]
pub struct SqliteSessionStore {
    path: PathBuf,
    conn: Connection,
}

impl SqliteSessionStore {
    /// Open or create a session store at the given path.
    ///
    /// Creates parent directories and the table if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening session store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::SessionOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute(CREATE_SESSION_TABLE, [])?;

        Ok(Self { path, conn })
    }

    /// Create an in-memory session store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::SessionOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        conn.execute(CREATE_SESSION_TABLE, [])?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Path to the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM session WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO session (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')
            ",
            (key, value),
        )?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM session WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

/// In-memory session store, for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.values.remove(key).is_some())
    }
}

/// Displayed authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// A session token is present.
    Authenticated,
    /// No session token is present.
    Anonymous,
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::Anonymous => write!(f, "not authenticated"),
        }
    }
}

/// Authentication glue over a session store.
///
/// `login` writes a freshly generated token; `logout` deletes it; the key's
/// existence is the sole signal of "logged in".
pub struct Auth {
    store: Box<dyn SessionStore>,
    key: String,
    counter: u64,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("key", &self.key)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl Auth {
    /// Create an auth handler over the given store and token key.
    #[must_use]
    pub fn new(store: Box<dyn SessionStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            counter: 0,
        }
    }

    /// Log in: generate a unique token and store it.
    ///
    /// Returns the generated token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn login(&mut self) -> Result<String> {
        let token = self.generate_token();
        self.store.set(&self.key, &token)?;
        info!("session opened");
        Ok(token)
    }

    /// Log out: delete the stored token.
    ///
    /// Returns `true` if a token was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn logout(&mut self) -> Result<bool> {
        let was_present = self.store.delete(&self.key)?;
        if was_present {
            info!("session closed");
        }
        Ok(was_present)
    }

    /// Whether a session token is currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store.get(&self.key)?.is_some())
    }

    /// The current authentication status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn status(&self) -> Result<AuthStatus> {
        Ok(if self.is_authenticated()? {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        })
    }

    /// The stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(&self.key)
    }

    /// Generate a token unique per call: a hash over the current timestamp
    /// and a monotonically increasing counter. The counter disambiguates
    /// calls landing on the same timestamp.
    fn generate_token(&mut self) -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let material = format!("{nanos}:{}", self.counter);
        self.counter += 1;
        blake3::hash(material.as_bytes()).to_hex().to_string()
    }
}
