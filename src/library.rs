use crate::filter::{self, FilterCriteria};
use crate::models::Sample;
use crate::scanner::{self, ScanError, ScanWarning};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The authoritative, read-only collection of samples for one root directory.
///
/// Built once per scan. Callers keep their own `FilterCriteria` and pull
/// filtered views from here; the collection itself never changes. Re-scanning
/// means opening a new `Library`.
pub struct Library {
    root: PathBuf,
    samples: Vec<Sample>,
    warnings: Vec<ScanWarning>,
}

/// Summary counts over a library.
pub struct LibraryStats {
    pub total_samples: usize,
    pub with_tempo: usize,
    pub with_key: usize,
    /// (extension, count), most common first.
    pub formats: Vec<(String, usize)>,
    /// (key label, count), most common first.
    pub keys: Vec<(String, usize)>,
}

impl Library {
    /// Scan `root` and take ownership of the resulting records.
    pub fn open(root: &Path) -> Result<Self, ScanError> {
        let result = scanner::scan(root)?;
        log::info!(
            "Indexed {} samples under {} ({} warnings)",
            result.samples.len(),
            root.display(),
            result.warnings.len()
        );
        Ok(Self {
            root: root.to_path_buf(),
            samples: result.samples,
            warnings: result.warnings,
        })
    }

    pub fn from_samples(root: impl Into<PathBuf>, samples: Vec<Sample>) -> Self {
        Self {
            root: root.into(),
            samples,
            warnings: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Records matching `criteria`, in library order. Recomputed on every call.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Sample> {
        filter::filter(&self.samples, criteria)
    }

    pub fn stats(&self) -> LibraryStats {
        let mut formats: HashMap<String, usize> = HashMap::new();
        let mut keys: HashMap<String, usize> = HashMap::new();

        for s in &self.samples {
            let ext = s.extension().unwrap_or_else(|| "?".to_string());
            *formats.entry(ext).or_insert(0) += 1;
            if let Some(k) = &s.key {
                *keys.entry(k.clone()).or_insert(0) += 1;
            }
        }

        LibraryStats {
            total_samples: self.samples.len(),
            with_tempo: self.samples.iter().filter(|s| s.tempo.is_some()).count(),
            with_key: self.samples.iter().filter(|s| s.key.is_some()).count(),
            formats: by_count_desc(formats),
            keys: by_count_desc(keys),
        }
    }
}

/// Sort tallies by count descending, then name, so output is deterministic.
fn by_count_desc(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut v: Vec<(String, usize)> = counts.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v
}
