use crate::common::file::{FileSpec, mutate_middle, script_blob, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

pub fn run_snapdiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("snapdiff").expect("Failed to find snapdiff binary");
    cmd.current_dir(dir).env("NO_COLOR", "1").args(args);
    cmd
}

#[fixture]
pub fn work_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Two captures of the same page
///
/// - `/app.js` changes content under the same URL
/// - the inline bundle is regenerated with a small edit and a new file name
/// - `/new.js` appears and `/old.js` disappears
/// - `/styles/site.css` stays the same
#[fixture]
pub fn capture_dirs(work_dir: TempDir) -> TempDir {
    let previous = work_dir.path().join("previous");
    let current = work_dir.path().join("current");

    let files = [
        (previous.join("app.js"), b"console.log('v1');".to_vec()),
        (previous.join("inline").join("0.js"), script_blob(600)),
        (previous.join("old.js"), b"window.legacy = true;".to_vec()),
        (previous.join("styles").join("site.css"), b"body { margin: 0; }".to_vec()),
        (current.join("app.js"), b"console.log('v2');".to_vec()),
        (
            current.join("inline").join("bundle.js"),
            mutate_middle(&script_blob(600), 5),
        ),
        (current.join("new.js"), b"window.fresh = true;".to_vec()),
        (current.join("styles").join("site.css"), b"body { margin: 0; }".to_vec()),
    ];

    for (path, content) in files {
        write_file(FileSpec::new(path, content));
    }

    work_dir
}

pub fn previous_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("previous")
}

pub fn current_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("current")
}
