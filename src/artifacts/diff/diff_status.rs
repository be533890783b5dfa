use bitflags::bitflags;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// Change detected for a resource between two snapshots
///
/// Unchanged resources carry no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
}

impl DiffStatus {
    pub fn status_char(&self) -> char {
        match self {
            DiffStatus::Added => 'A',
            DiffStatus::Removed => 'D',
            DiffStatus::Modified => 'M',
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
            DiffStatus::Modified => "modified",
        }
    }

    pub fn colored(&self) -> ColoredString {
        let status = self.status_char().to_string();
        match self {
            DiffStatus::Added => status.green(),
            DiffStatus::Removed => status.red(),
            DiffStatus::Modified => status.yellow(),
        }
    }

    pub fn matches_filter(status: Option<DiffStatus>, filter: DiffFilter) -> bool {
        match status {
            Some(DiffStatus::Added) => filter.contains(DiffFilter::ADDED),
            Some(DiffStatus::Removed) => filter.contains(DiffFilter::REMOVED),
            Some(DiffStatus::Modified) => filter.contains(DiffFilter::MODIFIED),
            None => filter.contains(DiffFilter::UNCHANGED),
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const REMOVED = 0b0010;
        const MODIFIED = 0b0100;
        const UNCHANGED = 0b1000;
    }
}

impl DiffFilter {
    /// Parse a `git diff --diff-filter` style string (`A`, `D`, `M`, plus `U` for unchanged)
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::REMOVED,
                'M' => filter |= Self::MODIFIED,
                'U' => filter |= Self::UNCHANGED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A", DiffFilter::ADDED)]
    #[case("AD", DiffFilter::ADDED | DiffFilter::REMOVED)]
    #[case("MUDA", DiffFilter::all())]
    #[case("", DiffFilter::empty())]
    fn parses_filter_letters(#[case] input: &str, #[case] expected: DiffFilter) {
        assert_eq!(DiffFilter::try_parse(input), Some(expected));
    }

    #[test]
    fn rejects_unknown_filter_letters() {
        assert_eq!(DiffFilter::try_parse("AX"), None);
    }

    #[rstest]
    #[case(Some(DiffStatus::Added), DiffFilter::ADDED, true)]
    #[case(Some(DiffStatus::Removed), DiffFilter::ADDED, false)]
    #[case(None, DiffFilter::UNCHANGED, true)]
    #[case(None, DiffFilter::MODIFIED, false)]
    fn filter_matches_statuses(
        #[case] status: Option<DiffStatus>,
        #[case] filter: DiffFilter,
        #[case] expected: bool,
    ) {
        assert_eq!(DiffStatus::matches_filter(status, filter), expected);
    }
}
