pub mod filename;

use crate::models::Sample;
use crate::SUPPORTED_EXTENSIONS;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Sample directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// An entry that was skipped during traversal.
#[derive(Debug, Clone)]
pub struct ScanWarning {
    pub path: Option<PathBuf>,
    pub message: String,
}

pub struct ScanResult {
    pub samples: Vec<Sample>,
    pub warnings: Vec<ScanWarning>,
    /// Files visited (symlinked files included), supported or not.
    pub files_seen: u64,
    pub skipped_unsupported: u64,
}

/// Whether a filename carries one of the supported audio extensions (any case).
pub fn is_supported(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| lower.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}

/// Walk `root` recursively and build one record per supported audio file.
///
/// Unreadable entries are logged and collected as warnings; only a missing or
/// non-directory root fails the scan.
pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {pos} files ({per_sec}) {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Scanning...");

    let mut result = ScanResult {
        samples: Vec::new(),
        warnings: Vec::new(),
        files_seen: 0,
        skipped_unsupported: 0,
    };

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf);
                log::warn!(
                    "Skipping {}: {}",
                    path.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
                    e
                );
                result.warnings.push(ScanWarning {
                    path,
                    message: e.to_string(),
                });
                continue;
            }
        };

        // Symlinked files are indexed; symlinked directories are not descended
        let is_file = if entry.file_type().is_symlink() {
            match entry.path().metadata() {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    log::warn!("Skipping {}: broken link ({})", entry.path().display(), e);
                    result.warnings.push(ScanWarning {
                        path: Some(entry.path().to_path_buf()),
                        message: format!("broken link: {e}"),
                    });
                    continue;
                }
            }
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }
        result.files_seen += 1;
        pb.inc(1);

        let name = entry.file_name().to_string_lossy();
        if !is_supported(&name) {
            log::trace!("Unsupported file: {}", entry.path().display());
            result.skipped_unsupported += 1;
            continue;
        }

        match Sample::from_path(entry.path()) {
            Some(sample) => {
                log::debug!(
                    "{} -> tempo {}, key {}",
                    sample.filename,
                    sample.tempo_display(),
                    sample.key_display()
                );
                result.samples.push(sample);
            }
            None => {
                log::warn!("Skipping {}: no file name", entry.path().display());
                result.warnings.push(ScanWarning {
                    path: Some(entry.path().to_path_buf()),
                    message: "no file name".to_string(),
                });
            }
        }
    }

    pb.finish_with_message(format!(
        "Done: {} samples, {} other files, {} warnings",
        result.samples.len(),
        result.skipped_unsupported,
        result.warnings.len()
    ));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(result: &ScanResult) -> Vec<&str> {
        let mut names: Vec<&str> = result.samples.iter().map(|s| s.filename.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported("kick.wav"));
        assert!(is_supported("KICK.WAV"));
        assert!(is_supported("pad.Aif"));
        assert!(is_supported("pad.aiff"));
        assert!(is_supported("vox.mp3"));
        assert!(is_supported("loop.flac"));
        assert!(is_supported(".wav"));
        assert!(!is_supported("noise.xyz"));
        assert!(!is_supported("notes.txt"));
        assert!(!is_supported("wav"));
        assert!(!is_supported("loopwav"));
    }

    #[test]
    fn test_scan_filters_and_extracts() {
        let dir = tempfile::tempdir().unwrap();
        for f in ["Groove_128bpm_Am.wav", "Pad_Fmaj.aiff", "noise.xyz", "Kick.wav"] {
            touch(dir.path(), f);
        }

        let result = scan(dir.path()).unwrap();
        assert_eq!(result.samples.len(), 3);
        assert_eq!(result.files_seen, 4);
        assert_eq!(result.skipped_unsupported, 1);
        assert!(result.warnings.is_empty());
        assert_eq!(names(&result), vec!["Groove_128bpm_Am.wav", "Kick.wav", "Pad_Fmaj.aiff"]);

        let groove = result.samples.iter().find(|s| s.filename.starts_with("Groove")).unwrap();
        assert_eq!(groove.tempo, Some(128));
        assert_eq!(groove.path, dir.path().join("Groove_128bpm_Am.wav"));

        let pad = result.samples.iter().find(|s| s.filename.starts_with("Pad")).unwrap();
        assert_eq!(pad.key.as_deref(), Some("F"));
        assert_eq!(pad.tempo, None);
    }

    #[test]
    fn test_scan_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "drums/kicks/Kick_01.wav");
        touch(dir.path(), "drums/hats/Hat_loop_bpm172.flac");
        touch(dir.path(), "synths/deep/nested/Lead_C#m.MP3");
        touch(dir.path(), "synths/readme.txt");

        let result = scan(dir.path()).unwrap();
        assert_eq!(
            names(&result),
            vec!["Hat_loop_bpm172.flac", "Kick_01.wav", "Lead_C#m.MP3"]
        );

        let lead = result.samples.iter().find(|s| s.filename.starts_with("Lead")).unwrap();
        assert_eq!(lead.key.as_deref(), Some("C#m"));
        assert_eq!(lead.path, dir.path().join("synths/deep/nested/Lead_C#m.MP3"));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan(dir.path()).unwrap();
        assert!(result.samples.is_empty());
        assert_eq!(result.files_seen, 0);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(scan(&missing), Err(ScanError::RootNotFound(p)) if p == missing));
    }

    #[test]
    fn test_scan_file_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Kick.wav");
        let file = dir.path().join("Kick.wav");
        assert!(matches!(scan(&file), Err(ScanError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "open/Kick.wav");
        touch(dir.path(), "locked/Snare.wav");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so only assert when the lock took effect
        let locked_out = fs::read_dir(&locked).is_err();
        let result = scan(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let result = result.unwrap();
        assert!(names(&result).contains(&"Kick.wav"));
        if locked_out {
            assert_eq!(names(&result), vec!["Kick.wav"]);
            assert_eq!(result.warnings.len(), 1);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_file_symlinks() {
        use std::os::unix::fs::symlink;

        let store = tempfile::tempdir().unwrap();
        touch(store.path(), "Bass_120bpm_Am.wav");
        touch(store.path(), "kit/Snare.wav");

        let dir = tempfile::tempdir().unwrap();
        symlink(store.path().join("Bass_120bpm_Am.wav"), dir.path().join("Bass_120bpm_Am.wav")).unwrap();
        symlink(store.path().join("kit"), dir.path().join("kit")).unwrap();

        let result = scan(dir.path()).unwrap();
        assert_eq!(names(&result), vec!["Bass_120bpm_Am.wav"]);
        assert_eq!(result.files_seen, 1);
        assert!(result.warnings.is_empty());

        let bass = &result.samples[0];
        assert_eq!(bass.path, dir.path().join("Bass_120bpm_Am.wav"));
        assert_eq!(bass.tempo, Some(120));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_broken_symlink_becomes_warning() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Kick.wav");
        symlink(dir.path().join("gone.wav"), dir.path().join("Dangling.wav")).unwrap();

        let result = scan(dir.path()).unwrap();
        assert_eq!(names(&result), vec!["Kick.wav"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, Some(dir.path().join("Dangling.wav")));
    }
}
