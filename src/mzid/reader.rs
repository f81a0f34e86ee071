use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};

use super::helpers::{get_attribute, parse_cv_param, SCAN_NUMBERS, SPECTRUM_TITLE};
use super::models::{IdentificationItem, SpectrumResult};
use super::{MzIdError, MzIdentMlReader};
use crate::scan_number;

impl<R: BufRead> MzIdentMlReader<R> {
    /// Read the next `SpectrumIdentificationResult`, collecting any `Peptide`
    /// elements passed on the way.
    pub fn next_result(&mut self) -> Result<Option<SpectrumResult>, MzIdError> {
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"Peptide" => self.read_peptide(&e)?,
                    b"SpectrumIdentificationResult" => {
                        let result = self.read_result(&e)?;
                        return Ok(Some(result));
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"SpectrumIdentificationResult" {
                        let mut result = Self::start_result(&e)?;
                        result.scan_number = scan_number::from_native_id(&result.spectrum_id);
                        self.count_result(&result);
                        return Ok(Some(result));
                    }
                }
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(MzIdError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    fn start_result(start_event: &BytesStart) -> Result<SpectrumResult, MzIdError> {
        Ok(SpectrumResult {
            spectrum_id: get_attribute(start_event, "spectrumID")?.unwrap_or_default(),
            ..Default::default()
        })
    }

    fn count_result(&mut self, result: &SpectrumResult) {
        self.stats.results += 1;
        self.stats.items += result.items.len();
        if result.scan_number.is_none() {
            self.stats.results_without_scan += 1;
        }
    }

    /// Parse a `Peptide` element and remember its sequence
    fn read_peptide(&mut self, start_event: &BytesStart) -> Result<(), MzIdError> {
        let id = get_attribute(start_event, "id")?;
        let mut sequence = String::new();
        let mut in_sequence = false;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"PeptideSequence" {
                        in_sequence = true;
                    }
                }
                Ok(Event::Text(ref t)) => {
                    if in_sequence {
                        sequence.push_str(&t.unescape()?);
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"PeptideSequence" => in_sequence = false,
                    b"Peptide" => break,
                    _ => {}
                },
                Ok(Event::Eof) => {
                    return Err(MzIdError::InvalidStructure(
                        "unexpected end of file inside Peptide".to_string(),
                    ))
                }
                Err(e) => return Err(MzIdError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        if let Some(id) = id {
            if !sequence.is_empty() {
                self.peptides.insert(id, sequence);
                self.stats.peptides += 1;
            }
        }
        Ok(())
    }

    /// Parse a single `SpectrumIdentificationResult` element
    fn read_result(&mut self, start_event: &BytesStart) -> Result<SpectrumResult, MzIdError> {
        let mut result = Self::start_result(start_event)?;
        let mut title_scan = None;
        let mut cv_scan = None;
        let mut current_item: Option<IdentificationItem> = None;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"SpectrumIdentificationItem" => {
                        current_item = Some(parse_item(e)?);
                    }
                    b"cvParam" if current_item.is_none() => {
                        read_scan_cv_param(e, &mut title_scan, &mut cv_scan)?;
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"SpectrumIdentificationItem" => {
                        result.items.push(parse_item(e)?);
                    }
                    b"cvParam" if current_item.is_none() => {
                        read_scan_cv_param(e, &mut title_scan, &mut cv_scan)?;
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"SpectrumIdentificationItem" => {
                        if let Some(item) = current_item.take() {
                            result.items.push(item);
                        }
                    }
                    b"SpectrumIdentificationResult" => break,
                    _ => {}
                },
                Ok(Event::Eof) => {
                    return Err(MzIdError::InvalidStructure(format!(
                        "unexpected end of file inside SpectrumIdentificationResult '{}'",
                        result.spectrum_id
                    )))
                }
                Err(e) => return Err(MzIdError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        result.scan_number = title_scan
            .or(cv_scan)
            .or_else(|| scan_number::from_native_id(&result.spectrum_id));
        self.count_result(&result);
        Ok(result)
    }
}

fn parse_item(e: &BytesStart) -> Result<IdentificationItem, MzIdError> {
    Ok(IdentificationItem {
        pass_threshold: get_attribute(e, "passThreshold")?
            .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
            .unwrap_or(false),
        rank: get_attribute(e, "rank")?.and_then(|v| v.trim().parse().ok()),
        peptide_ref: get_attribute(e, "peptide_ref")?,
    })
}

fn read_scan_cv_param(
    e: &BytesStart,
    title_scan: &mut Option<u64>,
    cv_scan: &mut Option<u64>,
) -> Result<(), MzIdError> {
    let param = parse_cv_param(e)?;
    let Some(value) = param.value.as_deref() else {
        return Ok(());
    };
    if param.is(SPECTRUM_TITLE, "spectrum title") {
        *title_scan = scan_number::from_native_id(value);
    } else if param.is(SCAN_NUMBERS, "scan number(s)") {
        *cv_scan = scan_number::from_scans_header(value);
    }
    Ok(())
}
