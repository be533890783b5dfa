use crate::areas::workspace::Workspace;
use crate::artifacts::diff::matcher::DiffOptions;
use crate::artifacts::resources::session::CaptureOptions;
use crate::artifacts::resources::snapshot::Snapshot;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Entry point for the command-line operations
///
/// Holds the capture and diff configuration plus the output sink every
/// command writes to.
pub struct Monitor {
    writer: RefCell<Box<dyn std::io::Write>>,
    capture_options: CaptureOptions,
    diff_options: DiffOptions,
}

impl Monitor {
    pub fn new(
        writer: Box<dyn std::io::Write>,
        capture_options: CaptureOptions,
        diff_options: DiffOptions,
    ) -> Self {
        Monitor {
            writer: RefCell::new(writer),
            capture_options,
            diff_options,
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn capture_options(&self) -> &CaptureOptions {
        &self.capture_options
    }

    pub fn diff_options(&self) -> &DiffOptions {
        &self.diff_options
    }

    /// Capture a directory of resource files
    pub fn load_snapshot(&self, path: &Path) -> anyhow::Result<Snapshot> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Capture directory not found: {}", path.display()))?;
        Workspace::new(path.into_boxed_path()).load_snapshot(self.capture_options)
    }
}
