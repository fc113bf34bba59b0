//! Periodic financial reporting engine.
//!
//! Folds the raw invoice and quotation collections into one statistics
//! report: revenue, VAT, outstanding, overdue, quotation pipeline and
//! conversion, compared against the previous period, plus the chart
//! series. Stateless and request-scoped; the record store is read-only
//! from here.

pub mod accumulate;
pub mod assemble;
pub mod charts;
pub mod classify;
pub mod dates;
pub mod growth;
pub mod handlers;
pub mod money;
pub mod period;


pub use assemble::{generate_report, StatsReport};
pub use handlers::stats_handler;
pub use period::{PeriodKind, PeriodRequest};
