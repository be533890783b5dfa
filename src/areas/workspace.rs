//! Capture directories on disk
//!
//! A capture directory holds the scripts and stylesheets of one page check.
//! Files are classified by extension, and their URL is their path relative to
//! the directory root. Files under the top-level `inline/` directory stand for
//! inline content and are recorded without a URL.

use crate::artifacts::resources::resource::ResourceKind;
use crate::artifacts::resources::session::{CaptureOptions, CaptureSession};
use crate::artifacts::resources::snapshot::Snapshot;
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const INLINE_DIR: &str = "inline";

const RESOURCE_KINDS: phf::Map<&'static str, ResourceKind> = phf::phf_map! {
    "js" => ResourceKind::Script,
    "mjs" => ResourceKind::Script,
    "cjs" => ResourceKind::Script,
    "css" => ResourceKind::Stylesheet,
};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resource files below the root, relative to it, in file name order
    pub fn list_resources(&self) -> anyhow::Result<Vec<(PathBuf, ResourceKind)>> {
        if !self.path.is_dir() {
            anyhow::bail!("The capture path is not a directory: {:?}", self.path);
        }

        let mut resources = Vec::new();
        for entry in WalkDir::new(&self.path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", self.path))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(kind) = Self::resource_kind(entry.path()) else {
                continue;
            };

            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .with_context(|| format!("{:?} is outside {:?}", entry.path(), self.path))?;
            resources.push((relative.to_path_buf(), kind));
        }

        Ok(resources)
    }

    fn resource_kind(path: &Path) -> Option<ResourceKind> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        RESOURCE_KINDS.get(extension.as_str()).copied()
    }

    /// URL recorded for a resource file, `None` for inline content
    pub fn resource_url(relative: &Path) -> Option<String> {
        let components = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>();

        match components.first() {
            Some(first) if first == INLINE_DIR && components.len() > 1 => None,
            _ => Some(format!("/{}", components.join("/"))),
        }
    }

    /// Capture every resource file into a snapshot
    pub fn load_snapshot(&self, options: CaptureOptions) -> anyhow::Result<Snapshot> {
        let mut session = CaptureSession::begin(options);

        for (relative, kind) in self.list_resources()? {
            let file_path = self.path.join(&relative);
            let file = std::fs::File::open(&file_path)
                .with_context(|| format!("Failed to open {}", file_path.display()))?;

            let url = Self::resource_url(&relative);
            session
                .record_reader(kind, url.as_deref(), std::io::BufReader::new(file))
                .with_context(|| format!("Failed to read {}", file_path.display()))?;
        }

        Ok(session.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("app.js", Some("/app.js"))]
    #[case("static/css/site.css", Some("/static/css/site.css"))]
    #[case("inline/0.js", None)]
    #[case("inline/nested/1.css", None)]
    #[case("vendor/inline/2.js", Some("/vendor/inline/2.js"))]
    fn inline_directory_has_no_urls(#[case] relative: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            Workspace::resource_url(Path::new(relative)).as_deref(),
            expected
        );
    }

    #[rstest]
    #[case("a.js", Some(ResourceKind::Script))]
    #[case("a.MJS", Some(ResourceKind::Script))]
    #[case("a.css", Some(ResourceKind::Stylesheet))]
    #[case("a.html", None)]
    #[case("Makefile", None)]
    fn classifies_by_extension(#[case] path: &str, #[case] expected: Option<ResourceKind>) {
        assert_eq!(Workspace::resource_kind(Path::new(path)), expected);
    }

    #[test]
    fn load_snapshot_records_files_in_name_order() -> anyhow::Result<()> {
        let dir = assert_fs::TempDir::new()?;
        std::fs::create_dir_all(dir.path().join("inline"))?;
        std::fs::write(dir.path().join("b.js"), "b()")?;
        std::fs::write(dir.path().join("a.js"), "a()")?;
        std::fs::write(dir.path().join("inline").join("0.js"), "c()")?;
        std::fs::write(dir.path().join("site.css"), "body{}")?;
        std::fs::write(dir.path().join("notes.txt"), "ignored")?;

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        let snapshot = workspace.load_snapshot(CaptureOptions::default())?;

        let scripts = snapshot
            .scripts
            .iter()
            .map(|resource| resource.url())
            .collect::<Vec<_>>();
        assert_eq!(scripts, vec![Some("/a.js"), Some("/b.js"), None]);
        assert_eq!(snapshot.styles.len(), 1);
        assert_eq!(snapshot.styles[0].url(), Some("/site.css"));

        Ok(())
    }

    #[test]
    fn listing_a_file_fails() -> anyhow::Result<()> {
        let file = assert_fs::NamedTempFile::new("a.js")?;
        std::fs::write(file.path(), "a()")?;

        let workspace = Workspace::new(file.path().to_path_buf().into_boxed_path());
        assert!(workspace.list_resources().is_err());

        Ok(())
    }
}
