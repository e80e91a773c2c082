//! Markdown presentation of plans, reports and mutation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! wrapper types give the same data a context-specific layout:
//!
//! - [`collections`]: [`PlanList`] for the dashboard listing
//! - [`results`]: create, update, delete and check-in outcomes
//! - [`report`]: the printable [`SummaryReport`]
//! - [`document`]: the printable [`OfficialDocument`] for one plan
//! - [`datetime`]: timestamp formatting in the system time zone
//!
//! Everything renders markdown; the CLI hands it to its terminal renderer.

pub mod collections;
pub mod datetime;
pub mod document;
pub mod models;
pub mod report;
pub mod results;

pub use collections::PlanList;
pub use datetime::{LocalDateTime, PrintedDateTime};
pub use document::OfficialDocument;
pub use report::SummaryReport;
pub use results::{CheckInResult, CreateResult, DeleteResult, Outcome, UpdateResult};
