use serde::Serialize;
use std::path::{Path, PathBuf};

/// Marker shown in place of a tempo or key that could not be inferred.
pub const NO_VALUE: &str = "-";

/// One audio file discovered by a scan.
///
/// Tempo and key are inferred from the filename once, when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub path: PathBuf,
    pub filename: String,
    pub tempo: Option<u32>,
    pub key: Option<String>,
}

impl Sample {
    /// Build a record for `path`, inferring tempo and key from its base name.
    /// Returns `None` for paths that have no file name component.
    pub fn from_path(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        if filename.is_empty() {
            return None;
        }

        Some(Self {
            tempo: crate::scanner::filename::extract_tempo(&filename),
            key: crate::scanner::filename::extract_key(&filename),
            path: path.to_path_buf(),
            filename,
        })
    }

    /// Pitch-class root of the key, with any minor/major suffix stripped.
    pub fn key_root(&self) -> Option<&str> {
        self.key
            .as_deref()
            .map(crate::scanner::filename::key_root)
    }

    pub fn tempo_display(&self) -> String {
        self.tempo
            .map(|t| t.to_string())
            .unwrap_or_else(|| NO_VALUE.to_string())
    }

    pub fn key_display(&self) -> &str {
        self.key.as_deref().unwrap_or(NO_VALUE)
    }

    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_infers_metadata() {
        let s = Sample::from_path(Path::new("/samples/loops/Groove_128bpm_Am.wav")).unwrap();
        assert_eq!(s.filename, "Groove_128bpm_Am.wav");
        assert_eq!(s.path, PathBuf::from("/samples/loops/Groove_128bpm_Am.wav"));
        assert_eq!(s.tempo, Some(128));
        assert_eq!(s.key.as_deref(), Some("G"));
    }

    #[test]
    fn test_from_path_requires_file_name() {
        assert!(Sample::from_path(Path::new("/")).is_none());
    }

    #[test]
    fn test_display_placeholders() {
        let s = Sample::from_path(Path::new("kick.wav")).unwrap();
        assert_eq!(s.tempo_display(), "-");
        assert_eq!(s.key_display(), "-");
        assert_eq!(s.key_root(), None);

        let s = Sample::from_path(Path::new("pad_Ebm_90bpm.flac")).unwrap();
        assert_eq!(s.tempo_display(), "90");
        assert_eq!(s.key_display(), "Ebm");
        assert_eq!(s.key_root(), Some("Eb"));
    }

    #[test]
    fn test_extension_lowercased() {
        let s = Sample::from_path(Path::new("Snare.AIFF")).unwrap();
        assert_eq!(s.extension().as_deref(), Some("aiff"));
    }
}
