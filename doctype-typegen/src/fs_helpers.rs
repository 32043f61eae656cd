//! Filesystem helpers shared across `doctype-typegen` modules.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::TypegenError;

/// Opens a directory, creating it and any missing parents first.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, TypegenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| TypegenError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| TypegenError::io(path, io_err))
        }
        Err(open_err) => Err(TypegenError::io(path, open_err)),
    }
}

/// Opens a subdirectory of `dir` if it exists, returning `None` when the
/// path is missing.
///
/// `display` is the full path used in error reports.
pub fn open_optional_subdir(
    dir: &Dir,
    path: &Utf8Path,
    display: &Utf8Path,
) -> Result<Option<Dir>, TypegenError> {
    match dir.open_dir(path) {
        Ok(subdir) => Ok(Some(subdir)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(TypegenError::io(display, err)),
    }
}

/// Reads a UTF-8 file beneath `dir`, returning `None` when it is missing.
pub fn read_optional(
    dir: &Dir,
    path: &Utf8Path,
    display: &Utf8Path,
) -> Result<Option<String>, TypegenError> {
    match dir.read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(TypegenError::io(display, err)),
    }
}

/// Lists the names of the immediate subdirectories of `dir`, sorted.
pub fn subdirectory_names(dir: &Dir, display: &Utf8Path) -> Result<Vec<String>, TypegenError> {
    let mut names = Vec::new();
    for entry_result in dir
        .read_dir(".")
        .map_err(|err| TypegenError::io(display, err))?
    {
        let entry = entry_result.map_err(|err| TypegenError::io(display, err))?;
        let file_type = entry
            .file_type()
            .map_err(|err| TypegenError::io(display, err))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry
            .file_name()
            .map_err(|err| TypegenError::io(display, err))?;
        names.push(name);
    }
    names.sort();
    Ok(names)
}
