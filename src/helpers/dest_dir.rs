use std::{fs, io, path::Path};

use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderState {
    Created,
    Existing,
    /// Something that is not a directory already sits at the path.
    Unusable,
}

/// Creates the destination directory unless it is already there. A
/// non-directory in the way is reported, not removed.
pub fn ensure_dir(path: &Path) -> io::Result<FolderState> {
    let state = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => FolderState::Existing,

        Ok(_) => {
            warn!(?path, "Destination exists and is not a directory");
            FolderState::Unusable
        }

        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path)?;
            FolderState::Created
        }

        Err(e) => return Err(e),
    };

    trace!(?path, ?state, "Destination folder checked");

    Ok(state)
}
