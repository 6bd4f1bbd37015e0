//! Read-only reports over ledger output: CSV export and impact summary.

pub mod csv;
pub mod impact;

pub use impact::ImpactSummary;
