use crate::artifacts::resources::content_digest::ContentDigest;
use crate::artifacts::resources::resource::Resource;
use bytes::Bytes;
use std::collections::HashMap;

/// Identity used to pair resources across snapshots
///
/// In order of precedence: a stable URL, then the fuzzy digest, then the
/// exact hash, then the raw content itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Url(String),
    Fuzzy(String),
    Exact(String),
    Raw(Bytes),
}

impl ResourceKey {
    pub fn of(resource: &Resource) -> Self {
        if let Some(url) = resource.stable_url() {
            return ResourceKey::Url(url.to_string());
        }

        match resource.digest() {
            ContentDigest::Fuzzy(digest) => ResourceKey::Fuzzy(digest.to_hex()),
            ContentDigest::Exact(hash) => ResourceKey::Exact(hash.to_string()),
            ContentDigest::Raw(content) => ResourceKey::Raw(content.clone()),
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, ResourceKey::Url(_))
    }
}

/// Resources grouped by key, keys kept in first-seen order
#[derive(Debug, Default)]
pub struct KeyIndex {
    order: Vec<ResourceKey>,
    groups: HashMap<ResourceKey, Vec<usize>>,
}

impl KeyIndex {
    /// Group the positions of `resources` by key
    pub fn build(resources: &[Resource]) -> Self {
        let mut index = KeyIndex::default();

        for (position, resource) in resources.iter().enumerate() {
            let key = ResourceKey::of(resource);
            match index.groups.get_mut(&key) {
                Some(group) => group.push(position),
                None => {
                    index.order.push(key.clone());
                    index.groups.insert(key, vec![position]);
                }
            }
        }

        index
    }

    /// Remove a group so it cannot be matched again
    pub fn consume(&mut self, key: &ResourceKey) -> Option<Vec<usize>> {
        self.groups.remove(key)
    }

    /// Groups still present, in first-seen key order
    pub fn remaining(&self) -> impl Iterator<Item = (&ResourceKey, &[usize])> {
        self.order
            .iter()
            .filter_map(|key| self.groups.get(key).map(|group| (key, group.as_slice())))
    }
}
