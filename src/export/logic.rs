//! High-level export flow: resolve the range, load the rows in
//! chronological order, hand them to the format writer.

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::RecordExport;
use crate::store::AttendanceStore;
use crate::ui::messages::warning;
use crate::utils::date::parse_range;

use crate::export::json_csv::{export_csv, export_json};
use std::io;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export attendance records.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"`, or a range expression
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `start:end`)
    ///
    /// Without a range, every record is exported. Rows always come out
    /// oldest first so external report tooling reads them chronologically.
    pub fn export(
        store: &AttendanceStore,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let records = match range {
            None => {
                let mut all = store.get_all()?;
                all.reverse(); // get_all is newest first; exports read chronologically
                all
            }
            Some(r) if r.eq_ignore_ascii_case("all") => {
                let mut all = store.get_all()?;
                all.reverse();
                all
            }
            Some(r) => {
                let (start, end) = parse_range(r)?;
                store.get_by_date_range(&start, &end)?
            }
        };

        if records.is_empty() {
            warning("No records found for the selected range.");
            return Ok(());
        }

        let rows: Vec<RecordExport> = records.iter().map(RecordExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(())
    }
}
