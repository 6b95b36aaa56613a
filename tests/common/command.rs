use assert_cmd::Command;
use std::path::Path;

pub fn run_conflicts_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("conflicts").expect("Failed to find conflicts binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
