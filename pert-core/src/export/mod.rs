//! Projections of a project for the outside world.
//!
//! - [`json`]: the lossless snapshot, which doubles as the persistence format.
//! - [`csv`]: an issue-tracker import sheet, one row per enabled task.
//! - [`report`]: a view model for an external report renderer.

pub mod csv;
pub mod json;
pub mod report;

pub use self::csv::{csv_filename, to_csv};
pub use self::json::{parse_snapshot, to_json};
pub use self::report::{ReportMilestone, ReportTask, ReportView};
