//! Capture sessions
//!
//! A session collects the resources of one page check and turns them into a
//! [`Snapshot`]. Each session owns its buffers, so any number of sessions can
//! run side by side without sharing state.
//!
//! ```rust,ignore
//! let mut session = CaptureSession::begin(CaptureOptions::default());
//! session.record(ResourceKind::Script, Some("/app.js"), &app_js);
//! session.record(ResourceKind::Script, None, &inline_js);
//! let snapshot = session.end();
//! ```

use crate::artifacts::resources::content_digest::ContentHasher;
use crate::artifacts::resources::resource::{Resource, ResourceKind};
use crate::artifacts::resources::snapshot::Snapshot;
use crate::artifacts::resources::DEFAULT_MAX_RAW_SIZE;
use derive_new::new;
use std::io::Read;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct CaptureOptions {
    /// Content up to this many bytes is stored verbatim instead of hashed
    pub max_raw_size: u64,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            max_raw_size: DEFAULT_MAX_RAW_SIZE,
        }
    }
}

#[derive(Debug)]
pub struct CaptureSession {
    options: CaptureOptions,
    scripts: Vec<Resource>,
    styles: Vec<Resource>,
}

impl CaptureSession {
    pub fn begin(options: CaptureOptions) -> Self {
        debug!(max_raw_size = options.max_raw_size, "capture session started");
        CaptureSession {
            options,
            scripts: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// Fingerprint a fully buffered resource
    pub fn record(&mut self, kind: ResourceKind, url: Option<&str>, content: &[u8]) -> &Resource {
        let resource = Resource::capture(kind, url, content, self.options.max_raw_size);
        self.push(resource)
    }

    /// Fingerprint a resource by streaming it from `reader`
    pub fn record_reader(
        &mut self,
        kind: ResourceKind,
        url: Option<&str>,
        reader: impl Read,
    ) -> std::io::Result<&Resource> {
        let mut hasher = ContentHasher::new(self.options.max_raw_size);
        hasher.update_from_reader(reader)?;

        let (digest, size) = hasher.finish();
        let resource = Resource::new(kind, url.map(str::to_string), digest, size);
        Ok(self.push(resource))
    }

    fn push(&mut self, resource: Resource) -> &Resource {
        let resources = match resource.kind() {
            ResourceKind::Script => &mut self.scripts,
            ResourceKind::Stylesheet => &mut self.styles,
        };
        resources.push(resource);
        &resources[resources.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.scripts.len() + self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn end(self) -> Snapshot {
        debug!(
            scripts = self.scripts.len(),
            styles = self.styles.len(),
            "capture session finished"
        );
        Snapshot::new(self.scripts, self.styles)
    }
}
