//! Two-tier resource matching
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Exact keys
//!
//! Both resource lists are grouped by [`ResourceKey`]. Every current key that
//! also exists in the previous snapshot is paired positionally with the
//! previous group: equal fingerprints are unchanged, different ones are
//! modified, and surplus entries on either side are added or removed.
//!
//! ### Phase 2: Approximate matching
//!
//! Current groups left over that have no stable URL but carry a fuzzy digest
//! are compared against leftover previous groups of the same shape. Candidates
//! are scanned in ascending size order and only considered when their size is
//! within the configured tolerance. The closest candidate below the distance
//! threshold is paired, the first one wins on ties.
//!
//! ### Phase 3: Leftovers
//!
//! Unpaired current resources are added, unpaired previous resources removed.
//!
//! ## Output Order
//!
//! Current resources keep their original order. Removed previous resources are
//! appended afterwards in their previous capture order.

use crate::artifacts::diff::diff_status::DiffStatus;
use crate::artifacts::diff::resource_key::{KeyIndex, ResourceKey};
use crate::artifacts::digest::{APPROXIMATE_MATCH_THRESHOLD, FuzzyDigest};
use crate::artifacts::resources::resource::{Resource, ResourceKind};
use crate::artifacts::resources::snapshot::Snapshot;
use tracing::{debug, trace};

/// Tuning knobs for the differ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffOptions {
    /// Distances strictly below this value count as an approximate match
    pub threshold: u32,
    /// Maximum relative size difference between approximate match candidates
    pub size_tolerance: f64,
    /// Whether the digest length code contributes to the distance
    pub include_length: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            threshold: APPROXIMATE_MATCH_THRESHOLD,
            size_tolerance: 0.10,
            include_length: true,
        }
    }
}

/// Diff two snapshots, scripts against scripts and styles against styles
pub fn diff_snapshots(previous: &Snapshot, current: &Snapshot, options: &DiffOptions) -> Snapshot {
    Snapshot::new(
        diff_resources(
            previous.resources_of(ResourceKind::Script),
            current.resources_of(ResourceKind::Script),
            options,
        ),
        diff_resources(
            previous.resources_of(ResourceKind::Stylesheet),
            current.resources_of(ResourceKind::Stylesheet),
            options,
        ),
    )
}

/// Annotate `current` with diff statuses relative to `previous`
///
/// Never fails: every resource ends up unchanged, added, removed or modified.
pub fn diff_resources(
    previous: &[Resource],
    current: &[Resource],
    options: &DiffOptions,
) -> Vec<Resource> {
    ResourceMatcher::new(previous, current, options).run()
}

/// Outcome for one current resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Pending,
    Resolved(Option<DiffStatus>),
}

struct ResourceMatcher<'r> {
    previous: &'r [Resource],
    current: &'r [Resource],
    options: &'r DiffOptions,
    previous_index: KeyIndex,
    resolutions: Vec<Resolution>,
    removed: Vec<usize>,
}

impl<'r> ResourceMatcher<'r> {
    fn new(previous: &'r [Resource], current: &'r [Resource], options: &'r DiffOptions) -> Self {
        ResourceMatcher {
            previous,
            current,
            options,
            previous_index: KeyIndex::build(previous),
            resolutions: vec![Resolution::Pending; current.len()],
            removed: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Resource> {
        let current_index = KeyIndex::build(self.current);
        let groups = current_index
            .remaining()
            .map(|(key, group)| (key.clone(), group.to_vec()))
            .collect::<Vec<_>>();

        let mut unmatched = Vec::new();
        for (key, group) in groups {
            match self.previous_index.consume(&key) {
                Some(previous_group) => self.pair(&group, &previous_group),
                None => unmatched.push((key, group)),
            }
        }

        for (key, group) in unmatched {
            if let Some(previous_key) = self.find_approximate_match(&key, &group)
                && let Some(previous_group) = self.previous_index.consume(&previous_key)
            {
                self.pair(&group, &previous_group);
            }
        }

        let leftovers = self
            .previous_index
            .remaining()
            .flat_map(|(_, group)| group.iter().copied())
            .collect::<Vec<_>>();
        self.removed.extend(leftovers);
        self.removed.sort_unstable();

        self.into_output()
    }

    /// Pair two groups position by position
    fn pair(&mut self, current_group: &[usize], previous_group: &[usize]) {
        let len = current_group.len().max(previous_group.len());

        for i in 0..len {
            match (current_group.get(i), previous_group.get(i)) {
                (Some(&current), Some(&previous)) => {
                    let unchanged =
                        self.current[current].digest() == self.previous[previous].digest();
                    let status = (!unchanged).then_some(DiffStatus::Modified);
                    self.resolutions[current] = Resolution::Resolved(status);
                }
                (Some(&current), None) => {
                    self.resolutions[current] = Resolution::Resolved(Some(DiffStatus::Added));
                }
                (None, Some(&previous)) => self.removed.push(previous),
                (None, None) => {}
            }
        }
    }

    fn find_approximate_match(&self, key: &ResourceKey, group: &[usize]) -> Option<ResourceKey> {
        if key.is_url() {
            return None;
        }

        let resource = &self.current[*group.first()?];
        let digest = resource.digest().as_fuzzy()?;
        let size = resource.size();

        let mut candidates = self
            .previous_index
            .remaining()
            .filter(|(key, _)| !key.is_url())
            .filter_map(|(key, group)| {
                let candidate = &self.previous[*group.first()?];
                let candidate_digest = candidate.digest().as_fuzzy()?;
                Some((key, candidate.size(), candidate_digest))
            })
            .collect::<Vec<_>>();
        // stable, so equal sizes keep their capture order
        candidates.sort_by_key(|(_, size, _)| *size);

        let mut best: Option<(&ResourceKey, u32)> = None;
        for (candidate_key, candidate_size, candidate_digest) in candidates {
            if !self.within_size_band(size, candidate_size) {
                if candidate_size > size {
                    // sorted ascending, every later candidate is even larger
                    break;
                }
                continue;
            }

            let distance = self.distance(digest, candidate_digest);
            trace!(size, candidate_size, distance, "approximate match candidate");

            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((candidate_key, distance));
            }
        }

        match best {
            Some((candidate_key, distance)) if distance < self.options.threshold => {
                debug!(
                    label = %resource.label(),
                    distance,
                    "paired inline resource by approximate match"
                );
                Some(candidate_key.clone())
            }
            Some((_, distance)) => {
                debug!(
                    label = %resource.label(),
                    distance,
                    threshold = self.options.threshold,
                    "closest candidate is too far"
                );
                None
            }
            None => None,
        }
    }

    fn within_size_band(&self, a: u64, b: u64) -> bool {
        let average = (a + b) as f64 / 2.0;
        a.abs_diff(b) as f64 <= self.options.size_tolerance * average
    }

    fn distance(&self, a: &FuzzyDigest, b: &FuzzyDigest) -> u32 {
        a.distance(b, self.options.include_length)
    }

    fn into_output(self) -> Vec<Resource> {
        let current = self
            .current
            .iter()
            .zip(&self.resolutions)
            .map(|(resource, resolution)| match resolution {
                Resolution::Resolved(status) => resource.with_diff_status(*status),
                Resolution::Pending => resource.with_diff_status(Some(DiffStatus::Added)),
            });

        let removed = self
            .removed
            .iter()
            .map(|&position| self.previous[position].with_diff_status(Some(DiffStatus::Removed)));

        current.chain(removed).collect()
    }
}
