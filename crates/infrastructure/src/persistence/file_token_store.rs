//! File-based token store.
//!
//! The token is kept as the raw string in a single file, by default
//! `<config dir>/ghkit/token`. On unix the file is created with mode `0600`
//! and its directory with `0700`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ghkit_application::ports::{TokenStore, TokenStoreError};
use ghkit_domain::Token;
use tracing::debug;

/// Token store backed by one file on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store for the given file path. Nothing is touched on disk
    /// until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> io::Result<()> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    fn open_for_write(&self) -> io::Result<fs::File> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(&self.path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        Ok(file)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<Token>, TokenStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Contents are returned exactly as written; only a zero-length file
        // counts as no token.
        if content.is_empty() {
            return Ok(None);
        }
        let token = Token::new(content).map_err(|e| TokenStoreError::Invalid(e.to_string()))?;
        debug!(path = %self.path.display(), "loaded token from file");
        Ok(Some(token))
    }

    fn set(&self, token: &Token) -> Result<(), TokenStoreError> {
        self.ensure_parent_dir()?;
        let mut file = self.open_for_write()?;
        file.write_all(token.as_str().as_bytes())?;
        file.sync_all()?;
        debug!(path = %self.path.display(), "saved token to file");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed token file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
