//! Durable key-value storage for persisted dashboard layouts
//!
//! A [`LayoutStore`] maps string keys to raw string values, the same shape as
//! a browser's local storage. Callers serialize their own values; the store
//! only guarantees that a successful [`LayoutStore::write`] is visible to the
//! next [`LayoutStore::read`] of the same key.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: a `HashMap` for tests and ephemeral sessions
//! - [`FileStore`]: one JSON object file, rewritten atomically on every change
//!
//! # Examples
//!
//! ```
//! use layout_store::{LayoutStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.write("personalized_dashboard", r#"["mensa","mobility"]"#)?;
//! assert_eq!(
//!     store.read("personalized_dashboard")?.as_deref(),
//!     Some(r#"["mensa","mobility"]"#)
//! );
//! # Ok::<(), layout_store::StoreError>(())
//! ```

#![warn(missing_docs)]

mod error;
mod file;
mod memory;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key-value persistence for raw string values.
///
/// Writes take `&mut self`: a store has a single writer, so successive writes
/// land in the order they were issued.
pub trait LayoutStore {
    /// Read the raw value stored under `key`, or `None` if the key is unset.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an unset key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Store several `(key, value)` pairs as one change.
    ///
    /// Either every pair is stored or, on error, the keys keep their previous
    /// values. The default writes pair by pair and puts back what it already
    /// wrote when a later write fails; stores that can write all keys at once
    /// should override it.
    fn write_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut written: Vec<(&str, Option<String>)> = Vec::with_capacity(entries.len());
        for &(key, value) in entries {
            let previous = self.read(key)?;
            if let Err(e) = self.write(key, value) {
                for (key, previous) in written.into_iter().rev() {
                    let restored = match previous {
                        Some(old) => self.write(key, &old),
                        None => self.remove(key),
                    };
                    if let Err(rollback) = restored {
                        log::warn!("Failed to restore '{}' after write error: {}", key, rollback);
                    }
                }
                return Err(e);
            }
            written.push((key, previous));
        }
        Ok(())
    }
}

impl<S: LayoutStore + ?Sized> LayoutStore for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn write_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).write_all(entries)
    }
}

impl<S: LayoutStore + ?Sized> LayoutStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn write_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).write_all(entries)
    }
}
