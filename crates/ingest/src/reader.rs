//! Stream, file and directory readers feeding a patient registry.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use vitals_storage::PatientRegistry;
use walkdir::WalkDir;

use crate::wire::parse_line;

const INPUT_EXTENSIONS: &[&str] = &["csv", "txt"];

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Line counts from one or more ingestion passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub accepted: usize,
    pub duplicates: usize,
    pub malformed: usize,
}

impl IngestSummary {
    pub fn total(&self) -> usize {
        self.accepted + self.duplicates + self.malformed
    }
}

impl AddAssign for IngestSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.accepted += rhs.accepted;
        self.duplicates += rhs.duplicates;
        self.malformed += rhs.malformed;
    }
}

// ── Readers ─────────────────────────────────────────────────────────

/// Ingest every line of `reader`. Blank lines are skipped; malformed lines
/// are logged and counted. Only a failed read ends the pass early.
pub fn read_stream(reader: impl BufRead, registry: &PatientRegistry) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(measurement) => {
                if measurement.apply(registry) {
                    summary.accepted += 1;
                } else {
                    summary.duplicates += 1;
                }
            }
            Err(e) => {
                warn!(line = idx + 1, error = %e, "skipping malformed measurement");
                summary.malformed += 1;
            }
        }
    }
    Ok(summary)
}

pub fn read_file(path: &Path, registry: &PatientRegistry) -> Result<IngestSummary> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let summary = read_stream(BufReader::new(file), registry)?;
    info!(
        path = %path.display(),
        accepted = summary.accepted,
        duplicates = summary.duplicates,
        malformed = summary.malformed,
        "ingested file"
    );
    Ok(summary)
}

/// Ingest every input file under `root`, in path order.
pub fn read_dir(root: &Path, registry: &PatientRegistry) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    for path in input_files(root)? {
        summary += read_file(&path, registry)?;
    }
    Ok(summary)
}

/// Resolve `root` to the `.csv`/`.txt` files it names, sorted by path.
/// A plain file is returned as-is regardless of extension.
pub fn input_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_input = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| INPUT_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)));
        if is_input {
            files.push(entry.into_path());
        }
    }
    files.sort();
    debug!(root = %root.display(), files = files.len(), "resolved input files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::io::Cursor;

    #[test]
    fn stream_counts_every_outcome() {
        let registry = PatientRegistry::new();
        let input = "\
1,100,HeartRate,72
1,100,heartrate,75

1,200,BloodSaturation,97%
garbage
2,100,ECG,not-a-number
";
        let summary = read_stream(Cursor::new(input), &registry).unwrap();
        assert_eq!(
            summary,
            IngestSummary {
                accepted: 2,
                duplicates: 1,
                malformed: 2,
            }
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(registry.record_count(), 2);
        assert_eq!(registry.get_records(1, 200, 200)[0].value(), 97.0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let registry = PatientRegistry::new();
        let err = read_file(Path::new("/no/such/vitals.csv"), &registry).unwrap_err();
        assert!(err.to_string().contains("/no/such/vitals.csv"));
    }

    #[test]
    fn directory_reads_inputs_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("ward")).unwrap();
        fs::write(dir.path().join("b.csv"), "1,2,HeartRate,80\n").unwrap();
        fs::write(dir.path().join("a.txt"), "1,1,HeartRate,70\n").unwrap();
        fs::write(dir.path().join("ward/c.CSV"), "2,1,HeartRate,60\n").unwrap();
        fs::write(dir.path().join("notes.md"), "1,3,HeartRate,90\n").unwrap();

        let files = input_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.csv"),
                PathBuf::from("ward/c.CSV"),
            ]
        );

        let registry = PatientRegistry::new();
        let summary = read_dir(dir.path(), &registry).unwrap();
        assert_eq!(summary.accepted, 3);
        assert_eq!(registry.all_patients(), vec![1, 2]);
    }

    #[test]
    fn single_file_root_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.log");
        fs::write(&path, "5,1,HeartRate,70\n").unwrap();
        assert_eq!(input_files(&path).unwrap(), vec![path.clone()]);
    }
}
