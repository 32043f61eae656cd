//! Declaration file writer.
//!
//! Files are only rewritten when their content changes, and new content is
//! staged in a sibling temporary file that is renamed over the target so
//! readers never observe a partial write.

use std::fmt;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::{Dir, File, OpenOptions};
use tracing::debug;

use crate::error::TypegenError;
use crate::fs_helpers::{ensure_dir, read_optional};
use crate::paths::OutputLocation;

/// What the writer did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// The file did not exist and was written.
    Created,
    /// The file existed with different content and was replaced.
    Updated,
    /// The file already held identical content and was left untouched.
    Unchanged,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        })
    }
}

/// A declaration file produced during a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    /// DocType the file declares.
    pub doctype: String,
    /// Absolute or bench-relative path of the file.
    pub path: Utf8PathBuf,
    /// Outcome of the write.
    pub status: WriteStatus,
}

/// Writes the declaration for `doctype` at its canonical location beneath
/// `apps_root`, creating intermediate directories.
pub fn emit_declaration(
    apps_root: &Utf8Path,
    location: &OutputLocation,
    doctype: &str,
    content: &str,
) -> Result<EmittedFile, TypegenError> {
    let dir_path = apps_root.join(location.dir());
    let dir = ensure_dir(&dir_path)?;
    let status = write_if_changed(&dir, &dir_path, &location.file_name(), content)?;
    let path = dir_path.join(location.file_name());
    debug!(doctype, path = %path, %status, "emitted declaration");
    Ok(EmittedFile {
        doctype: doctype.to_owned(),
        path,
        status,
    })
}

/// Writes `content` to `file_name` inside `dir` unless it already matches.
///
/// `dir_path` is the path of `dir`, used in error reports.
pub fn write_if_changed(
    dir: &Dir,
    dir_path: &Utf8Path,
    file_name: &str,
    content: &str,
) -> Result<WriteStatus, TypegenError> {
    let target = dir_path.join(file_name);
    let status = match read_optional(dir, Utf8Path::new(file_name), &target)? {
        Some(existing) if existing == content => return Ok(WriteStatus::Unchanged),
        Some(_) => WriteStatus::Updated,
        None => WriteStatus::Created,
    };

    let staging = format!(".{file_name}.tmp");
    stage(dir, &staging, &dir_path.join(&staging), |file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    })?;
    dir.rename(&staging, dir, file_name)
        .map_err(|io_err| TypegenError::io(&target, io_err))?;
    Ok(status)
}

/// Fills the staging file `staging` with `fill`, removing it again when
/// filling fails.
fn stage<F>(dir: &Dir, staging: &str, staging_path: &Utf8Path, fill: F) -> Result<(), TypegenError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut file = dir
        .open_with(
            staging,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| TypegenError::io(staging_path, io_err))?;
    let filled = fill(&mut file);
    drop(file);

    if let Err(io_err) = filled {
        if let Err(cleanup) = dir.remove_file(staging) {
            debug!(path = %staging_path, error = %cleanup, "failed to remove staging file");
        }
        return Err(TypegenError::io(staging_path, io_err));
    }
    Ok(())
}
