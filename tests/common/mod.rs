use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub fn run_sikum(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
    work: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
            work: tempfile::tempdir().expect("create temporary working dir"),
        }
    }

    /// Run the binary inside the working dir, with no API keys in scope.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sikum"))
            .args(args)
            .current_dir(self.work.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("OPENAI_API_KEY")
            .env_remove("SIKUM_GEMINI_API_KEY")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to execute sikum binary")
    }

    #[allow(dead_code)]
    pub fn work_dir(&self) -> &Path {
        self.work.path()
    }

    /// Write `config.toml` where the binary looks for it.
    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let dir = self.config.path().join("sikum");
        std::fs::create_dir_all(&dir).expect("create sikum config dir");
        std::fs::write(dir.join("config.toml"), contents).expect("write config file");
    }

    /// Create a file in the working dir and return its absolute path.
    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.work.path().join(name);
        std::fs::write(&path, contents).expect("write test input file");
        path
    }
}
