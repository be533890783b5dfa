use crate::artifacts::diff::diff_status::DiffStatus;
use crate::artifacts::resources::content_digest::ContentDigest;
use serde::{Deserialize, Serialize};

/// URL schemes that identify a single page load rather than a resource
const UNSTABLE_URL_SCHEMES: [&str; 2] = ["blob:", "data:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Script,
    Stylesheet,
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Script => "script",
            ResourceKind::Stylesheet => "stylesheet",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A script or stylesheet observed during one capture
///
/// Resources are immutable once captured. The diff status is only attached
/// by the differ, which hands back annotated copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    digest: ContentDigest,
    size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diff_status: Option<DiffStatus>,
}

impl Resource {
    pub fn new(kind: ResourceKind, url: Option<String>, digest: ContentDigest, size: u64) -> Self {
        Resource {
            kind,
            url,
            digest,
            size,
            diff_status: None,
        }
    }

    /// Fingerprint `content` and wrap it as a resource
    pub fn capture(
        kind: ResourceKind,
        url: Option<&str>,
        content: &[u8],
        max_raw_size: u64,
    ) -> Self {
        let digest = ContentDigest::compute(content, max_raw_size);
        Self::new(
            kind,
            url.map(str::to_string),
            digest,
            content.len() as u64,
        )
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The URL, unless it only identifies a single page load (`blob:`, `data:`)
    pub fn stable_url(&self) -> Option<&str> {
        self.url()
            .filter(|url| !UNSTABLE_URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme)))
    }

    pub fn digest(&self) -> &ContentDigest {
        &self.digest
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn diff_status(&self) -> Option<DiffStatus> {
        self.diff_status
    }

    /// Human-readable name: the URL, or the digest for keyless content
    pub fn label(&self) -> String {
        match self.url() {
            Some(url) => url.to_string(),
            None => match &self.digest {
                ContentDigest::Raw(_) => format!("<inline {} bytes>", self.size),
                ContentDigest::Fuzzy(digest) => format!("<inline {}>", digest.to_tagged_hex()),
                ContentDigest::Exact(hash) => format!("<inline {}>", hash.to_short_hash()),
            },
        }
    }

    pub(crate) fn with_diff_status(&self, diff_status: Option<DiffStatus>) -> Self {
        Resource {
            diff_status,
            ..self.clone()
        }
    }
}
