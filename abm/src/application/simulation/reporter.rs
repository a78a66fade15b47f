//! Reporting port
//!
//! The engine hands each finished round to a [`RoundReporter`] before the
//! next round starts. Rendering and persistence live outside the core.

use super::RoundReport;
use crate::domain::SimResult;

pub trait RoundReporter {
    /// Accept one round's records, in interaction order
    fn report(&mut self, report: &RoundReport) -> SimResult<()>;
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl RoundReporter for NullReporter {
    fn report(&mut self, _report: &RoundReport) -> SimResult<()> {
        Ok(())
    }
}

/// Collects reports in memory
impl RoundReporter for Vec<RoundReport> {
    fn report(&mut self, report: &RoundReport) -> SimResult<()> {
        self.push(report.clone());
        Ok(())
    }
}
