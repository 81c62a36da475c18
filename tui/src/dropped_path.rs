//! Dropped-file handling.
//!
//! Terminals deliver a file drop as a paste of the file's path. This module
//! normalizes pasted text that may represent a filesystem path and resolves
//! it into a [`SourceFile`] (size from metadata, MIME type guessed from the
//! extension) so the composer can treat it as a drop signal.

use std::path::Path;
use std::path::PathBuf;

use recast_core::SourceFile;

/// Normalize pasted text that may represent a filesystem path.
///
/// Supports:
/// - `file://` URLs (converted to local paths)
/// - Windows/UNC paths (passed through; POSIX shlex would mangle backslashes)
/// - shell-escaped or quoted single paths (via `shlex`)
pub fn normalize_dropped_path(pasted: &str) -> Option<PathBuf> {
    let pasted = pasted.trim();

    // file:// URL → filesystem path
    if let Ok(url) = url::Url::parse(pasted)
        && url.scheme() == "file"
    {
        return url.to_file_path().ok();
    }

    // Detect unquoted Windows paths and bypass POSIX shlex which treats
    // backslashes as escapes (e.g., C:\Users\Alice\episode.mp3). Also handles
    // UNC paths (\\server\share\path).
    let looks_like_windows_path = {
        let drive = pasted
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && pasted.get(1..2) == Some(":")
            && pasted
                .get(2..3)
                .is_some_and(|s| s == "\\" || s == "/");
        let unc = pasted.starts_with("\\\\");
        drive || unc
    };
    if looks_like_windows_path {
        return Some(PathBuf::from(pasted));
    }

    // shell-escaped single path → unescaped
    let parts: Vec<String> = shlex::Shlex::new(pasted).collect();
    if parts.len() == 1 {
        return parts.into_iter().next().map(PathBuf::from);
    }

    None
}

/// Guess a declared MIME type from the file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("aiff") | Some("aif") => "audio/aiff",
        Some("mp4") => "video/mp4",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Resolve pasted text into a [`SourceFile`] if it names an existing file.
///
/// Returns `None` when the paste is not a single path or the path does not
/// point at a regular file; the caller then treats the paste as ordinary
/// text (or ignores it, depending on the active surface).
pub fn dropped_source_file(pasted: &str) -> Option<SourceFile> {
    let path = normalize_dropped_path(pasted)?;

    let metadata = match std::fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => {
            tracing::trace!("dropped path is not a regular file: {}", path.display());
            return None;
        }
        Err(err) => {
            tracing::trace!("dropped path not readable: {err}");
            return None;
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = guess_mime_type(&path).to_string();
    tracing::debug!("dropped file {name} ({} bytes, {mime_type})", metadata.len());

    Some(SourceFile {
        name,
        size_bytes: metadata.len(),
        mime_type,
    })
}
