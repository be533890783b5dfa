use crate::areas::monitor::Monitor;
use crate::artifacts::diff::diff_status::{DiffFilter, DiffStatus};
use crate::artifacts::diff::matcher::diff_snapshots;
use crate::artifacts::resources::resource::Resource;
use crate::artifacts::resources::snapshot::Snapshot;
use colored::Colorize;
use std::path::Path;

const KIND_WIDTH: usize = 10;

impl Monitor {
    /// Diff two capture directories and print the annotated resources
    pub fn diff(
        &self,
        previous: &Path,
        current: &Path,
        filter: DiffFilter,
        json: bool,
    ) -> anyhow::Result<()> {
        let previous = self.load_snapshot(previous)?;
        let current = self.load_snapshot(current)?;

        let diffed = diff_snapshots(&previous, &current, self.diff_options());

        if json {
            let filtered = Snapshot::new(
                Self::filter_resources(&diffed.scripts, filter),
                Self::filter_resources(&diffed.styles, filter),
            );
            serde_json::to_writer_pretty(&mut *self.writer(), &filtered)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        for resource in diffed
            .resources()
            .filter(|resource| DiffStatus::matches_filter(resource.diff_status(), filter))
        {
            self.print_resource(resource)?;
        }

        self.print_summary(&diffed)
    }

    fn filter_resources(resources: &[Resource], filter: DiffFilter) -> Vec<Resource> {
        resources
            .iter()
            .filter(|resource| DiffStatus::matches_filter(resource.diff_status(), filter))
            .cloned()
            .collect()
    }

    fn print_resource(&self, resource: &Resource) -> anyhow::Result<()> {
        let status = match resource.diff_status() {
            Some(status) => status.colored(),
            None => " ".normal(),
        };

        writeln!(
            self.writer(),
            "{} {:<width$} {}",
            status,
            resource.kind().as_str(),
            resource.label(),
            width = KIND_WIDTH
        )?;

        Ok(())
    }

    fn print_summary(&self, diffed: &Snapshot) -> anyhow::Result<()> {
        let count = |status: DiffStatus| {
            diffed
                .resources()
                .filter(|resource| resource.diff_status() == Some(status))
                .count()
        };

        writeln!(
            self.writer(),
            "{} added, {} removed, {} modified",
            count(DiffStatus::Added),
            count(DiffStatus::Removed),
            count(DiffStatus::Modified)
        )?;

        Ok(())
    }
}
