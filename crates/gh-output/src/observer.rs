//! `CsvObserver` — bridges `SimObserver` to the CSV tick log.

use gh_core::Tick;
use gh_grid::Grid;
use gh_sim::{SimObserver, TickStats};

use crate::csv::{TickCsv, TickRow};
use crate::error::{OutputError, OutputResult};

/// A [`SimObserver`] that appends one [`TickRow`] per tick.
///
/// Observer methods have no return value, so the first write error is stored
/// and surfaced after the run via [`take_error`][Self::take_error].
pub struct CsvObserver {
    log: TickCsv,
    last_error: Option<OutputError>,
}

impl CsvObserver {
    pub fn new(log: TickCsv) -> Self {
        Self {
            log,
            last_error: None,
        }
    }

    /// The first write error, if any occurred during the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl SimObserver for CsvObserver {
    fn on_tick_end(&mut self, stats: &TickStats, grid: &Grid) {
        let row = TickRow::collect(stats, grid);
        let result = self.log.write_tick(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick, _grid: &Grid) {
        let result = self.log.finish();
        self.store_err(result);
    }
}
