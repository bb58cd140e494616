//! SSH credential provisioning for git fetches.
//!
//! When a private key is configured, git must use it for the repository host
//! without prompting about unknown host keys. The resource writes an
//! `~/.ssh/config` pinning an identity file to the host and stores the key
//! next to it. Both files are left alone when they already exist, so repeated
//! fetches in the same container are cheap.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;

use crate::error::ResourceError;

use super::fs::ensure_directory;

const SSH_DIR_NAME: &str = ".ssh";
const CONFIG_FILE_NAME: &str = "config";
const KEY_FILE_NAME: &str = "github.key";

const DIR_MODE: u32 = 0o700;
const FILE_MODE: u32 = 0o600;

/// Writes SSH configuration and key material under a home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCredentials {
    home: Utf8PathBuf,
    host: String,
}

/// Which files a provisioning run actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOutcome {
    /// The SSH config file was written.
    pub wrote_config: bool,
    /// The private key file was written.
    pub wrote_key: bool,
}

impl SshCredentials {
    /// Provisions credentials under `home` for connections to `host`.
    #[must_use]
    pub fn new(home: impl Into<Utf8PathBuf>, host: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            host: host.into(),
        }
    }

    /// Provisions credentials under the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] when the home directory cannot be
    /// determined or is not valid UTF-8.
    pub fn for_current_user(host: impl Into<String>) -> Result<Self, ResourceError> {
        let home = dirs::home_dir().ok_or_else(|| ResourceError::Io {
            message: "cannot determine home directory for SSH configuration".to_owned(),
        })?;
        let utf8_home = Utf8PathBuf::from_path_buf(home).map_err(|path| ResourceError::Io {
            message: format!("home directory is not valid UTF-8: {}", path.display()),
        })?;
        Ok(Self::new(utf8_home, host))
    }

    /// Directory holding the SSH files.
    #[must_use]
    pub fn ssh_dir(&self) -> Utf8PathBuf {
        self.home.join(SSH_DIR_NAME)
    }

    /// Path of the private key file.
    #[must_use]
    pub fn key_path(&self) -> Utf8PathBuf {
        self.ssh_dir().join(KEY_FILE_NAME)
    }

    /// Renders the SSH configuration pinning the key to the host.
    #[must_use]
    pub fn render_config(&self) -> String {
        format!(
            "StrictHostKeyChecking no\nUserKnownHostsFile /dev/null\nHost {host}\n  IdentityFile {key}\n",
            host = self.host,
            key = self.key_path()
        )
    }

    /// Writes the SSH config and the private key, skipping existing files.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] when the directory or either file cannot
    /// be created or restricted.
    pub fn provision(&self, private_key: &str) -> Result<ProvisionOutcome, ResourceError> {
        let ssh_dir = self.open_ssh_dir()?;

        let wrote_config = write_restricted(
            &ssh_dir,
            &self.ssh_dir(),
            CONFIG_FILE_NAME,
            &self.render_config(),
        )?;

        let key = if private_key.ends_with('\n') {
            private_key.to_owned()
        } else {
            format!("{private_key}\n")
        };
        let wrote_key = write_restricted(&ssh_dir, &self.ssh_dir(), KEY_FILE_NAME, &key)?;

        tracing::info!(
            ssh_dir = %self.ssh_dir(),
            wrote_config,
            wrote_key,
            "provisioned SSH credentials"
        );
        Ok(ProvisionOutcome {
            wrote_config,
            wrote_key,
        })
    }

    fn open_ssh_dir(&self) -> Result<Dir, ResourceError> {
        let home = ensure_directory(&self.home)?;

        if !home.exists(SSH_DIR_NAME) {
            home.create_dir(SSH_DIR_NAME)
                .map_err(|error| ResourceError::Io {
                    message: format!("failed to create '{}': {error}", self.ssh_dir()),
                })?;
            restrict(&home, &self.home, SSH_DIR_NAME, DIR_MODE)?;
        }

        home.open_dir(SSH_DIR_NAME)
            .map_err(|error| ResourceError::Io {
                message: format!("failed to open '{}': {error}", self.ssh_dir()),
            })
    }
}

fn write_restricted(
    dir: &Dir,
    dir_path: &Utf8Path,
    name: &str,
    contents: &str,
) -> Result<bool, ResourceError> {
    if dir.exists(name) {
        tracing::debug!(file = %dir_path.join(name), "leaving existing SSH file untouched");
        return Ok(false);
    }

    dir.write(name, contents).map_err(|error| ResourceError::Io {
        message: format!("failed to write '{}': {error}", dir_path.join(name)),
    })?;

    restrict(dir, dir_path, name, FILE_MODE)?;
    Ok(true)
}

#[cfg(unix)]
fn restrict(dir: &Dir, dir_path: &Utf8Path, name: &str, mode: u32) -> Result<(), ResourceError> {
    use cap_std::fs::PermissionsExt;

    let metadata = dir.metadata(name).map_err(|error| ResourceError::Io {
        message: format!("failed to stat '{}': {error}", dir_path.join(name)),
    })?;
    let mut permissions = metadata.permissions();
    permissions.set_mode(mode);
    dir.set_permissions(name, permissions)
        .map_err(|error| ResourceError::Io {
            message: format!("failed to chmod '{}': {error}", dir_path.join(name)),
        })
}

#[cfg(not(unix))]
fn restrict(_dir: &Dir, _dir_path: &Utf8Path, _name: &str, _mode: u32) -> Result<(), ResourceError> {
    Ok(())
}
