//! Tabular report writing.
//!
//! A report is an ordered list of [`Sheet`]s: a name, a header row and rows of
//! plain string cells. [`XlsxReportWriter`] renders them as one `.xlsx`
//! workbook with a bold header row and a uniform column width.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::path::Path;

pub const DEFAULT_COLUMN_WIDTH: u16 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: &[&str]) -> Self {
        Self {
            name: name.into(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sheet `{sheet}` exceeds the spreadsheet size limits")]
    TooLarge { sheet: String },
}

/// Sink for a finished report.
pub trait ReportWriter {
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), ReportError>;
}

#[derive(Debug, Clone)]
pub struct XlsxReportWriter {
    column_width: u16,
}

impl Default for XlsxReportWriter {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_width(mut self, width: u16) -> Self {
        self.column_width = width;
        self
    }

    /// Render the workbook into memory.
    pub fn render(&self, sheets: &[Sheet]) -> Result<Vec<u8>, ReportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in sheets {
            let too_large = || ReportError::TooLarge {
                sheet: sheet.name.clone(),
            };
            let worksheet = workbook.add_worksheet().set_name(&sheet.name)?;

            let width = sheet
                .rows
                .iter()
                .map(Vec::len)
                .chain(std::iter::once(sheet.header.len()))
                .max()
                .unwrap_or(0);
            for col in 0..width {
                let col = u16::try_from(col).map_err(|_| too_large())?;
                worksheet.set_column_width(col, self.column_width)?;
            }

            for (col, title) in sheet.header.iter().enumerate() {
                let col = u16::try_from(col).map_err(|_| too_large())?;
                worksheet.write_string_with_format(0, col, title, &header_format)?;
            }

            for (idx, cells) in sheet.rows.iter().enumerate() {
                let row = u32::try_from(idx + 1).map_err(|_| too_large())?;
                for (col, cell) in cells.iter().enumerate() {
                    let col = u16::try_from(col).map_err(|_| too_large())?;
                    worksheet.write_string(row, col, cell)?;
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

impl ReportWriter for XlsxReportWriter {
    /// Writes to a `.tmp` sibling first and renames it into place, so a
    /// failed write never leaves a complete-looking report behind.
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), ReportError> {
        let bytes = self.render(sheets)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("xlsx.tmp");
        if let Err(err) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::info!(
            path = %path.display(),
            sheets = sheets.len(),
            rows = sheets.iter().map(|s| s.rows.len()).sum::<usize>(),
            "wrote report"
        );
        Ok(())
    }
}
