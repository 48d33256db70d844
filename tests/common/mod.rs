// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;

/// Temporary notes directory.
pub struct Vault {
    dir: tempfile::TempDir,
}

impl Vault {
    pub fn new() -> Self {
        Self { dir: tempfile::Builder::new().prefix("vault").tempdir().unwrap() }
    }

    pub fn with(files: &[(&str, &str)]) -> Self {
        let vault = Self::new();
        for (path, contents) in files {
            vault.write_file(path, contents);
        }
        vault
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// `notecount` pointed at this vault.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_notecount"));
        cmd.arg(self.path()).env_remove("RUST_LOG");
        cmd
    }
}
