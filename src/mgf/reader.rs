use std::io::{BufRead, ErrorKind};

use log::{debug, warn};

use super::models::{MgfScan, Peak, SkipReason};
use super::{MgfError, MgfReader};
use crate::scan_number;

/// Header and peak data accumulated for the block being read
#[derive(Debug, Default)]
struct BlockBuilder {
    start_line: usize,
    title: Option<String>,
    scans: Option<String>,
    retention_time: Option<f64>,
    pepmass: Option<String>,
    charge: Option<i32>,
    peaks: Vec<Peak>,
}

impl BlockBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            ..Default::default()
        }
    }

    fn build(self) -> Result<MgfScan, SkipReason> {
        let scan_number = self
            .title
            .as_deref()
            .and_then(scan_number::from_native_id)
            .or_else(|| self.scans.as_deref().and_then(scan_number::from_scans_header))
            .ok_or(SkipReason::MissingScanNumber)?;

        let pepmass = self.pepmass.ok_or(SkipReason::MissingPrecursor)?;
        let (precursor_mz, precursor_intensity, pepmass_charge) = parse_pepmass(&pepmass)
            .ok_or_else(|| SkipReason::InvalidPrecursor(pepmass.clone()))?;

        Ok(MgfScan {
            scan_number,
            title: self.title.unwrap_or_default(),
            retention_time: self.retention_time,
            precursor_mz,
            precursor_intensity,
            charge: self.charge.or(pepmass_charge),
            peaks: self.peaks,
        })
    }
}

impl<R: BufRead> MgfReader<R> {
    /// Read the next valid scan, skipping malformed blocks.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn next_scan(&mut self) -> Result<Option<MgfScan>, MgfError> {
        if self.done {
            return Ok(None);
        }

        let mut block: Option<BlockBuilder> = None;
        loop {
            if !self.read_line()? {
                self.done = true;
                if let Some(open) = block.take() {
                    self.skip_block(open.start_line, SkipReason::Unterminated);
                }
                return Ok(None);
            }

            let line = self.buffer.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }

            if line == "BEGIN IONS" {
                if let Some(open) = block.take() {
                    self.skip_block(open.start_line, SkipReason::Interrupted);
                }
                self.stats.blocks += 1;
                block = Some(BlockBuilder::new(self.line_number));
                continue;
            }

            if line == "END IONS" {
                let Some(finished) = block.take() else {
                    debug!("Ignoring END IONS without BEGIN IONS on line {}", self.line_number);
                    continue;
                };
                let start_line = finished.start_line;
                match finished.build() {
                    Ok(scan) if !self.seen_scans.insert(scan.scan_number) => {
                        self.skip_block(start_line, SkipReason::DuplicateScan(scan.scan_number));
                    }
                    Ok(scan) => {
                        self.stats.scans += 1;
                        self.stats.peaks += scan.peaks.len();
                        return Ok(Some(scan));
                    }
                    Err(reason) => self.skip_block(start_line, reason),
                }
                continue;
            }

            let Some(current) = block.as_mut() else {
                // Global parameters (e.g. CHARGE=2+ before the first block) are not per-scan
                debug!("Ignoring line {} outside of an ion block", self.line_number);
                continue;
            };

            if let Some(peak) = parse_peak_line(line) {
                current.peaks.push(peak);
            } else if let Some((key, value)) = line.split_once('=') {
                apply_header(current, key.trim(), value.trim(), self.line_number);
            } else {
                warn!("Skipping unrecognised MGF line {}: '{}'", self.line_number, line);
                self.stats.skipped_lines += 1;
            }
        }
    }

    /// Read one line into the buffer; returns false at end of input
    fn read_line(&mut self) -> Result<bool, MgfError> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.line_number += 1;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(MgfError::InvalidUtf8 {
                line: self.line_number + 1,
            }),
            Err(e) => Err(MgfError::IoError(e)),
        }
    }

    fn skip_block(&mut self, start_line: usize, reason: SkipReason) {
        warn!(
            "Skipping ion block starting at line {}: {}",
            start_line, reason
        );
        self.stats.skipped_blocks += 1;
    }
}

fn is_comment(line: &str) -> bool {
    matches!(line.as_bytes()[0], b'#' | b';' | b'!' | b'/')
}

fn apply_header(block: &mut BlockBuilder, key: &str, value: &str, line_number: usize) {
    match key.to_ascii_uppercase().as_str() {
        "TITLE" => block.title = Some(value.to_string()),
        "SCANS" => block.scans = Some(value.to_string()),
        "PEPMASS" => block.pepmass = Some(value.to_string()),
        "RTINSECONDS" => match value.parse() {
            Ok(rt) => block.retention_time = Some(rt),
            Err(_) => warn!(
                "Invalid RTINSECONDS '{}' on line {}, leaving retention time empty",
                value, line_number
            ),
        },
        "CHARGE" => block.charge = parse_charge(value),
        _ => {}
    }
}

/// Parse a finite float; `NaN` and `inf` are rejected
fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a `mz intensity [charge]` peak line
fn parse_peak_line(line: &str) -> Option<Peak> {
    let mut parts = line.split_ascii_whitespace();
    let mz = parse_finite(parts.next()?)?;
    let intensity = parse_finite(parts.next()?)?;
    if let Some(charge) = parts.next() {
        parse_charge(charge)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Peak::new(mz, intensity))
}

/// Parse `PEPMASS=mz [intensity [charge]]`
fn parse_pepmass(value: &str) -> Option<(f64, f64, Option<i32>)> {
    let mut parts = value.split_ascii_whitespace();
    let mz = parse_finite(parts.next()?)?;
    let intensity = match parts.next() {
        Some(token) => parse_finite(token)?,
        None => 0.0,
    };
    let charge = parts.next().and_then(parse_charge);
    Some((mz, intensity, charge))
}

/// Parse charges written as `2+`, `3-`, `+2` or `2`; the first of several
/// (`2+ and 3+`) is used.
pub(super) fn parse_charge(value: &str) -> Option<i32> {
    let token = value.split(|c: char| c.is_whitespace() || c == ',').next()?;
    if let Some(number) = token.strip_suffix('+') {
        number.parse().ok()
    } else if let Some(number) = token.strip_suffix('-') {
        number.parse::<i32>().ok().map(|c| -c)
    } else {
        token.parse().ok()
    }
}
