use assert_cmd::Command;
use std::path::Path;

pub fn weightlog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("weightlog").unwrap();
    cmd.env_remove("WEIGHTLOG_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialized log rooted at `path`
pub fn init_log(path: &Path) {
    weightlog_cmd().arg("init").arg(path).assert().success();
}

/// Command running inside the log at `path`
pub fn in_log(path: &Path) -> Command {
    let mut cmd = weightlog_cmd();
    cmd.current_dir(path);
    cmd
}
