//! Fixture loading
//!
//! Fixtures live in `tests/fixtures` at the crate root and are addressed by file name.

use super::FixtureError;
use std::path::PathBuf;

const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

#[derive(Debug, Clone)]
pub struct Fixture {
    path: PathBuf,
}

impl Fixture {
    pub fn named(name: &str) -> Self {
        Self {
            path: PathBuf::from(FIXTURE_DIR).join(name),
        }
    }

    pub fn source(&self) -> Result<String, FixtureError> {
        std::fs::read_to_string(&self.path).map_err(|source| FixtureError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Names of every `.cpp` fixture, sorted.
    pub fn all() -> Result<Vec<String>, FixtureError> {
        let entries = std::fs::read_dir(FIXTURE_DIR).map_err(|source| FixtureError::Io {
            path: FIXTURE_DIR.to_string(),
            source,
        })?;
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".cpp"))
            .collect();
        names.sort();
        Ok(names)
    }
}
