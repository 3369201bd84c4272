//! Generated source units and writing them to disk

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, span, warn, Level};

use super::GenerateError;

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    /// Name of the class this file declares
    pub class_name: String,
    /// File name relative to the output directory
    pub file_name: String,
    /// Full file contents
    pub contents: String,
}

/// Whether `file_name` names a file directly inside its directory
fn is_plain_file_name(file_name: &str) -> bool {
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !file_name.contains(|c: char| c == '/' || c == '\\')
}

/// Write generated sources flat into `dir`, creating it first
///
/// Every file name must be a single plain path component; otherwise nothing
/// is written. Files are written one by one; if a write fails, the files
/// already written stay on disk. Returns the paths written, in order.
pub fn write_sources(
    dir: impl AsRef<Path>,
    sources: &[GeneratedSource],
) -> Result<Vec<PathBuf>, GenerateError> {
    let dir = dir.as_ref();
    let write_span = span!(Level::INFO, "write_sources", dir = %dir.display(), count = sources.len());
    let _enter = write_span.enter();

    if let Some(source) = sources.iter().find(|s| !is_plain_file_name(&s.file_name)) {
        warn!(file_name = %source.file_name, "Generated file name leaves the output directory");
        return Err(GenerateError::unsafe_file_name(&source.file_name));
    }

    fs::create_dir_all(dir).map_err(|e| GenerateError::io_error(dir, e))?;

    let mut written = Vec::with_capacity(sources.len());
    for source in sources {
        let path = dir.join(&source.file_name);
        fs::write(&path, &source.contents).map_err(|e| GenerateError::io_error(&path, e))?;
        debug!(path = %path.display(), bytes = source.contents.len(), "Wrote source file");
        written.push(path);
    }

    info!(files = written.len(), "Generated sources written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, contents: &str) -> GeneratedSource {
        GeneratedSource {
            class_name: name.to_string(),
            file_name: format!("{}.cs", name),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Generated").join("design");

        let written = write_sources(&target, &[source("Player", "class Player {}")]).unwrap();

        assert_eq!(written, vec![target.join("Player.cs")]);
        assert_eq!(
            fs::read_to_string(target.join("Player.cs")).unwrap(),
            "class Player {}"
        );
    }

    #[test]
    fn test_rejects_names_outside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        for name in ["../Escaped", "nested/Deep", "nested\\Deep", "/abs/Root"] {
            let error = write_sources(&target, &[source(name, "x")]).unwrap_err();
            assert!(
                matches!(error, GenerateError::UnsafeFileName { .. }),
                "{name} should be rejected"
            );
        }

        assert!(!target.exists());
        assert!(!dir.path().join("Escaped.cs").exists());
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("Player.cs"));
        assert!(is_plain_file_name("Player_2.cs"));
        assert!(!is_plain_file_name("../Player.cs"));
        assert!(!is_plain_file_name("a/b.cs"));
        assert!(!is_plain_file_name("a\\b.cs"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name("."));
    }

    #[test]
    fn test_writes_flat_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let sources = [source("B", "b"), source("A", "a")];

        let written = write_sources(dir.path(), &sources).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("B.cs"));
        assert!(written[1].ends_with("A.cs"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.cs"), "stale").unwrap();

        write_sources(dir.path(), &[source("A", "fresh")]).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("A.cs")).unwrap(), "fresh");
    }

    #[test]
    fn test_directory_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_sources(&blocker, &[source("A", "a")]).unwrap_err();
        assert!(matches!(err, GenerateError::IoError { .. }));
    }
}
