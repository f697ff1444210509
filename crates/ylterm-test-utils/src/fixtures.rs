use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixtures {
    temp_dir: TempDir,
}

impl TestFixtures {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Write a predef file and return its path
    pub fn create_predef(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// A path inside the fixture directory that does not exist
    pub fn missing(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

// Common test data
pub mod data {
    pub const PREDEF: &str = "; standard definitions\n\
                              (define inc (lambda (x) (+ x 1)))\n\
                              \n\
                              (define twice\n\
                              \x20 (lambda (f x) (f (f x))))\n";

    pub const BROKEN_PREDEF: &str = "(define inc (lambda (x) (+ x 1))))\n";

    pub fn generate_lines(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("(line {i})")).collect()
    }
}
