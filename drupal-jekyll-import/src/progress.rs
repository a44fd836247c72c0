//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a pass starts (e.g., "Reading menu links").
    fn on_phase(&self, message: &str);

    /// Called after each content record is processed in pass 2.
    fn on_record(&self, current: usize, total: usize, title: &str);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}
