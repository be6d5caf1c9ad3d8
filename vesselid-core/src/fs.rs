//! Identifier list loading.

use std::path::Path;

use crate::error::Result;

/// Abstraction over filesystem access for testability.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Read a file into a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a new standard filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse identifier list contents: one identifier per line, blank lines and
/// `#` comments skipped.
pub fn parse_identifiers(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load an identifier list file.
pub fn load_identifiers<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Vec<String>> {
    let contents = fs.read_to_string(path)?;
    Ok(parse_identifiers(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VesselIdError;
    use std::path::PathBuf;

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let contents = "# fleet\n9074729\n\n  IMO 9176187  \n#9074728\n";
        assert_eq!(
            parse_identifiers(contents),
            vec!["9074729".to_string(), "IMO 9176187".to_string()]
        );
    }

    #[test]
    fn load_reads_through_filesystem() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .withf(|path| path.ends_with("fleet.txt"))
            .times(1)
            .returning(|_| Ok("366123000\n232123000\n".to_string()));

        let ids = load_identifiers(&fs, Path::new("fleet.txt")).expect("load");
        assert_eq!(ids, vec!["366123000".to_string(), "232123000".to_string()]);
    }

    #[test]
    fn load_propagates_read_errors() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string().returning(|_| {
            Err(VesselIdError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )))
        });

        let error = load_identifiers(&fs, Path::new("missing.txt")).expect_err("error");
        assert!(matches!(error, VesselIdError::Io(_)));
    }

    #[test]
    fn std_filesystem_reads_files() {
        let root = std::env::temp_dir().join(unique_dir_name());
        std::fs::create_dir_all(&root).expect("create temp dir");
        let file_path = root.join("ids.txt");
        std::fs::write(&file_path, "9074729\n").expect("write test file");

        let ids = load_identifiers(&StdFileSystem::new(), &file_path).expect("load");
        assert_eq!(ids, vec!["9074729".to_string()]);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    fn unique_dir_name() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        PathBuf::from(format!("vesselid_core_test_{nanos}"))
    }
}
