//! CSV tick log.
//!
//! One row per tick: what the tick did plus a status census of every item in
//! the world, so a run can be charted without replaying it.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use gh_core::ItemStatus;
use gh_grid::Grid;
use gh_sim::TickStats;

use crate::error::OutputResult;

/// One logged row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRow {
    pub tick: u64,
    pub spawned: u64,
    pub assigned: u64,
    pub enacted: u64,
    pub conflicts: u64,
    pub awaiting: u64,
    pub held: u64,
    pub delivered_total: u64,
}

impl TickRow {
    /// Snapshot a committed tick.
    pub fn collect(stats: &TickStats, grid: &Grid) -> Self {
        let mut awaiting = 0;
        let mut held = 0;
        for item in grid.items() {
            match item.status() {
                ItemStatus::AwaitingPickup => awaiting += 1,
                ItemStatus::AssignedToAgent | ItemStatus::InTransit => held += 1,
                ItemStatus::Delivered => {}
            }
        }
        Self {
            tick: stats.tick.0,
            spawned: stats.spawned as u64,
            assigned: stats.assigned as u64,
            enacted: stats.enacted as u64,
            conflicts: stats.conflicts as u64,
            awaiting,
            held,
            delivered_total: grid.delivered.len() as u64,
        }
    }
}

/// Append-only CSV writer for [`TickRow`]s.
pub struct TickCsv {
    writer: Writer<File>,
    finished: bool,
}

impl TickCsv {
    /// Create (or truncate) the log file and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "tick",
            "spawned",
            "assigned",
            "enacted",
            "conflicts",
            "awaiting",
            "held",
            "delivered_total",
        ])?;
        Ok(Self {
            writer,
            finished: false,
        })
    }

    pub fn write_tick(&mut self, row: &TickRow) -> OutputResult<()> {
        self.writer.write_record(&[
            row.tick.to_string(),
            row.spawned.to_string(),
            row.assigned.to_string(),
            row.enacted.to_string(),
            row.conflicts.to_string(),
            row.awaiting.to_string(),
            row.held.to_string(),
            row.delivered_total.to_string(),
        ])?;
        Ok(())
    }

    /// Flush the file.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
