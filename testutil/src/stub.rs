use std::{fs::{self, Permissions}, os::unix::fs::PermissionsExt, path::{Path, PathBuf}};

use tempfile::TempDir;

const ARGS_FILE: &str = "args";

/// A stand-in for the quota script, living in its own temporary directory.
///
/// Every stub records the arguments it was called with, so tests can tell
/// whether (and how) it was invoked. The script body can refer to its
/// directory as `$STUB_DIR` to leave more evidence behind.
pub struct StubScript {
    dir: TempDir,
    path: PathBuf,
}

impl StubScript {
    /// A stub that runs `body` after recording its arguments.
    pub fn with_body(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("isilon_quota");
        let script = format!(
            "#!/bin/sh\nSTUB_DIR='{}'\nprintf '%s\\n' \"$@\" > \"$STUB_DIR/{}\"\n{}\n",
            dir.path().to_str().unwrap(),
            ARGS_FILE,
            body,
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o755)).unwrap();
        StubScript { dir, path }
    }

    pub fn exiting_with(code: i32) -> Self {
        Self::with_body(&format!("exit {}", code))
    }

    /// A stub that kills itself with `signal` (e.g. "KILL", "TERM").
    pub fn killed_by(signal: &str) -> Self {
        Self::with_body(&format!("kill -s {} $$\nexit 0", signal))
    }

    /// A path inside an empty temporary directory.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("isilon_quota");
        StubScript { dir, path }
    }

    /// A stub script without execute permission.
    pub fn not_executable() -> Self {
        let stub = Self::exiting_with(0);
        fs::set_permissions(&stub.path, Permissions::from_mode(0o644)).unwrap();
        stub
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// The arguments of the last invocation, or None if the stub never ran.
    pub fn invocation(&self) -> Option<Vec<String>> {
        self.read(ARGS_FILE).map(|args| args.lines().map(str::to_owned).collect())
    }

    pub fn was_invoked(&self) -> bool {
        self.invocation().is_some()
    }

    /// Contents of a file the stub body wrote into `$STUB_DIR`.
    pub fn read(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.dir.path().join(name)).ok()
    }
}
