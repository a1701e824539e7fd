use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding input HTML and config files
pub struct TestWorkspace {
    dir: TempDir,
    files: HashMap<String, PathBuf>,
}

impl TestWorkspace {
    /// Create a new temporary workspace
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            files: HashMap::new(),
        }
    }

    /// Create a file in the workspace, creating parent directories as needed
    pub fn create_file(&mut self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        self.files.insert(name.to_string(), path.clone());
        path
    }

    /// Path of a file created earlier
    pub fn path(&self, name: &str) -> &Path {
        self.files
            .get(name)
            .unwrap_or_else(|| panic!("File not found: {}", name))
    }

    /// Get workspace root path
    pub fn root_path(&self) -> &Path {
        self.dir.path()
    }
}
