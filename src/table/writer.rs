use std::io::Write;

use super::{format_flag, format_float, TableError, TableLayout, TargetReport};
use crate::join::ScanRow;

/// Streaming CSV writer for scan rows
pub struct ScanTableWriter<W: Write> {
    writer: csv::Writer<W>,
    layout: TableLayout,
    rows_written: usize,
}

impl<W: Write> ScanTableWriter<W> {
    /// Create a writer and emit the header row
    pub fn new(writer: W, layout: TableLayout) -> Result<Self, TableError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(layout.header())?;

        Ok(Self {
            writer,
            layout,
            rows_written: 0,
        })
    }

    /// Layout of this table
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Write a single row
    pub fn write_row(&mut self, row: &ScanRow) -> Result<(), TableError> {
        if row.targets.len() != self.layout.target_labels.len() {
            return Err(TableError::TargetCountMismatch {
                scan_number: row.scan_number,
                expected: self.layout.target_labels.len(),
                actual: row.targets.len(),
            });
        }

        let mut record: Vec<String> = Vec::with_capacity(self.layout.target_labels.len() + 7);
        record.push(row.scan_number.to_string());
        record.push(row.retention_time.map(format_float).unwrap_or_default());
        record.push(format_float(row.precursor_mz));
        record.push(format_float(row.precursor_intensity));
        record.push(format_float(row.summed_ms2_intensity));

        for matched in &row.targets {
            record.push(match self.layout.target_report {
                TargetReport::Flag => format_flag(matched.hit).to_string(),
                TargetReport::Intensity if matched.hit => format_float(matched.intensity),
                TargetReport::Intensity => String::new(),
            });
        }

        if self.layout.identifications {
            let identification = row.identification.clone().unwrap_or_default();
            record.push(format_flag(identification.passed).to_string());
            record.push(identification.peptide.unwrap_or_default());
        }

        self.writer.write_record(&record)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write several rows
    pub fn write_rows(&mut self, rows: &[ScanRow]) -> Result<(), TableError> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Flush and return the number of data rows written
    pub fn finish(mut self) -> Result<usize, TableError> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}
