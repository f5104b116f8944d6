use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::Error;

/// Prefix of every workspace directory created under the temp root
pub const WORKSPACE_PREFIX: &str = "code-dispatch-";

/// Ephemeral directory owned by a single execution request.
///
/// The directory and everything written into it is removed when the value is
/// dropped, whichever way the request ends.
#[derive(Debug)]
pub struct Workspace {
    /// Root directory for the workspace
    root_dir: PathBuf,
    /// Unique ID for this workspace instance
    id: Uuid,
}

impl Workspace {
    /// Create a fresh, uniquely named directory under `temp_root`
    pub async fn acquire(temp_root: &Path) -> Result<Self, Error> {
        fs::create_dir_all(temp_root).await.map_err(|e| {
            Error::Workspace(format!(
                "Failed to create temp root {}: {}",
                temp_root.display(),
                e
            ))
        })?;

        let id = Uuid::new_v4();
        let root_dir = temp_root.join(format!("{}{}", WORKSPACE_PREFIX, id));

        // Non-recursive create so a name collision fails instead of sharing a directory
        fs::create_dir(&root_dir).await.map_err(|e| {
            Error::Workspace(format!("Failed to create workspace directory: {}", e))
        })?;

        debug!("Acquired workspace {:?}", root_dir);
        Ok(Self { root_dir, id })
    }

    pub fn path(&self) -> &Path {
        &self.root_dir
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Write `contents` to `file_name` inside the workspace
    pub async fn write_file(&self, file_name: &str, contents: &str) -> Result<PathBuf, Error> {
        let path = self.root_dir.join(file_name);
        if path.parent() != Some(self.root_dir.as_path()) {
            return Err(Error::Workspace(format!(
                "Refusing to write outside the workspace: {}",
                file_name
            )));
        }
        fs::write(&path, contents).await?;
        Ok(path)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.root_dir) {
            Ok(()) => debug!("Released workspace {:?}", self.root_dir),
            Err(e) => error!(
                "Failed to clean up workspace directory {:?}: {}",
                self.root_dir, e
            ),
        }
    }
}
