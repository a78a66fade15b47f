//! Round trace rendering
//!
//! Renders each [`RoundReport`] as a block of text:
//!
//! ```text
//! --- Round 1 ---
//! Interaction 1 | Agent: random, Capital: $799.00, Units: 1, Action: buy, Success: true | Current Stock: 99 | Current Price: $201.00
//! ```
//!
//! The block is logged under the `abm::trace` target and/or written to a
//! trace file.

use abm::{RoundRecord, RoundReport, RoundReporter, SimError, SimResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Log target for the rendered trace
pub const TRACE_TARGET: &str = "abm::trace";

/// Round a money amount to cents, half away from zero
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render one interaction line
pub fn format_record(record: &RoundRecord) -> String {
    format!(
        "Interaction {} | Agent: {}, Capital: ${:.2}, Units: {}, Action: {}, Success: {} | Current Stock: {} | Current Price: ${:.2}",
        record.interaction,
        record.kind,
        to_cents(record.capital),
        record.inventory,
        record.action,
        record.success,
        record.stock,
        to_cents(record.price)
    )
}

/// Render a whole round, header first, one line per interaction
///
/// Rounds are numbered from 1 in the trace.
pub fn format_round(report: &RoundReport) -> String {
    let mut out = format!("--- Round {} ---\n", report.round + 1);
    for record in &report.records {
        out.push_str(&format_record(record));
        out.push('\n');
    }
    out
}

/// Writes the human-readable round trace
pub struct TraceReporter<W: Write = BufWriter<File>> {
    writer: Option<W>,
    verbose: bool,
}

impl TraceReporter<BufWriter<File>> {
    /// Log-only reporter
    pub fn new(verbose: bool) -> Self {
        Self {
            writer: None,
            verbose,
        }
    }

    /// Reporter writing to `path`, truncating any existing file
    pub fn to_file(path: impl AsRef<Path>, verbose: bool) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            verbose,
        })
    }
}

impl<W: Write> TraceReporter<W> {
    pub fn with_writer(writer: W, verbose: bool) -> Self {
        Self {
            writer: Some(writer),
            verbose,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Take back the underlying writer, if any
    pub fn into_inner(self) -> Option<W> {
        self.writer
    }
}

impl<W: Write> RoundReporter for TraceReporter<W> {
    fn report(&mut self, report: &RoundReport) -> SimResult<()> {
        if !self.verbose && self.writer.is_none() {
            return Ok(());
        }

        let block = format_round(report);

        if self.verbose {
            log::info!(target: TRACE_TARGET, "{}", block.trim_end());
        }

        if let Some(writer) = self.writer.as_mut() {
            writer
                .write_all(block.as_bytes())
                .map_err(|e| SimError::Report(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abm::{Action, AgentId, AgentKind};
    use rust_decimal_macros::dec;

    fn report() -> RoundReport {
        RoundReport {
            round: 4,
            records: vec![
                RoundRecord {
                    round: 4,
                    interaction: 1,
                    agent_id: AgentId(0),
                    kind: AgentKind::Random,
                    capital: dec!(799),
                    inventory: 1,
                    action: Action::Buy,
                    success: true,
                    stock: 99,
                    price: dec!(201.000),
                },
                RoundRecord {
                    round: 4,
                    interaction: 2,
                    agent_id: AgentId(1),
                    kind: AgentKind::Optimizing,
                    capital: dec!(1000),
                    inventory: 0,
                    action: Action::Sell,
                    success: false,
                    stock: 99,
                    price: dec!(201.000),
                },
            ],
        }
    }

    #[test]
    fn test_format_record() {
        let report = report();
        assert_eq!(
            format_record(&report.records[0]),
            "Interaction 1 | Agent: random, Capital: $799.00, Units: 1, Action: buy, Success: true | Current Stock: 99 | Current Price: $201.00"
        );
    }

    #[test]
    fn test_format_round() {
        let text = format_round(&report());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "--- Round 5 ---");
        assert!(lines[2].starts_with("Interaction 2 | Agent: optimizing,"));
        assert!(lines[2].contains("Action: sell, Success: false"));
    }

    #[test]
    fn test_prices_rounded_to_cents() {
        let mut report = report();
        report.records[0].capital = dec!(596.996);
        report.records[0].price = dec!(202.009);
        let line = format_record(&report.records[0]);
        assert!(line.contains("Capital: $597.00,"), "{line}");
        assert!(line.ends_with("Current Price: $202.01"), "{line}");

        report.records[0].capital = dec!(596.994975);
        report.records[0].price = dec!(202.00500);
        let line = format_record(&report.records[0]);
        assert!(line.contains("Capital: $596.99,"), "{line}");
        assert!(line.ends_with("Current Price: $202.01"), "{line}");
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(to_cents(dec!(1.004)), dec!(1.00));
        assert_eq!(to_cents(dec!(201.000)), dec!(201.00));
        assert_eq!(to_cents(dec!(12)), dec!(12));
    }

    #[test]
    fn test_writes_to_writer() {
        let mut reporter = TraceReporter::with_writer(Vec::new(), false);
        reporter.report(&report()).unwrap();
        reporter.report(&report()).unwrap();

        let bytes = reporter.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.matches("--- Round 5 ---").count(), 2);
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_write_failure_is_report_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut reporter = TraceReporter::with_writer(Broken, false);
        assert!(matches!(
            reporter.report(&report()),
            Err(SimError::Report(_))
        ));
    }

    #[test]
    fn test_log_only_reporter_accepts_rounds() {
        let mut reporter = TraceReporter::new(false);
        assert!(!reporter.is_verbose());
        reporter.report(&report()).unwrap();
        reporter.flush().unwrap();
        assert!(reporter.into_inner().is_none());
    }
}
