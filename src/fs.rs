//! File system utilities.

use std::fs;
use std::io;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// A reader of `path` sees either the previous content or the new content,
/// never a partial write. The temp file lives next to the target so the
/// rename stays on one filesystem. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory, the temp file or the rename fails.
/// On failure the temp file is removed and the original file is untouched.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    if let Err(e) = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
