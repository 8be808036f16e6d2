//! Test environment for running the `quire` binary in isolation.
//!
//! Every environment gets its own temp tree:
//!
//! ```text
//! <root>/
//!   sources/content   content origin
//!   sources/config    site configuration origin
//!   icons/            application icons
//!   static/           static files
//!   data/             data store (written by the CLI)
//!   home/             HOME / XDG_CONFIG_HOME
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment can't leak in
const QUIRE_VARS: &[&str] = &[
    "QUIRE_CONTENT_PATH",
    "QUIRE_CONFIG_PATH",
    "QUIRE_DATA_PATH",
    "QUIRE_ICONS_PATH",
    "QUIRE_STATIC_PATH",
    "QUIRE_REFRESH",
    "QUIRE_LOG",
];

/// Result of running a Quire CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad JSON line {l:?}: {e}")))
            .collect()
    }
}

/// Isolated site layout plus helpers to run the CLI against it
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            root: TempDir::new().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_quire")),
        };
        for dir in [
            "sources/content",
            "sources/config/navigation",
            "icons",
            "static",
            "home",
        ] {
            fs::create_dir_all(env.path(dir)).expect("Failed to create layout");
        }
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn content_origin(&self) -> PathBuf {
        self.path("sources/content")
    }

    pub fn config_origin(&self) -> PathBuf {
        self.path("sources/config")
    }

    pub fn data_path(&self) -> PathBuf {
        self.path("data")
    }

    /// Write a file relative to the root, creating parents
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    /// Environment pointing every QUIRE_* path into this layout
    pub fn site_vars(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("QUIRE_CONTENT_PATH", self.content_origin()),
            ("QUIRE_CONFIG_PATH", self.config_origin()),
            ("QUIRE_DATA_PATH", self.data_path()),
            ("QUIRE_ICONS_PATH", self.path("icons")),
            ("QUIRE_STATIC_PATH", self.path("static")),
        ]
    }

    /// Run with the full site environment
    pub fn run(&self, args: &[&str]) -> TestResult {
        let vars = self.site_vars();
        let vars: Vec<(&str, &Path)> = vars.iter().map(|(k, v)| (*k, v.as_path())).collect();
        self.run_with_env(args, &vars)
    }

    /// Run with only the given QUIRE_* variables set
    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &Path)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("home/.config"));
        for var in QUIRE_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute quire");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
