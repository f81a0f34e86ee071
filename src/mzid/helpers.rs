use quick_xml::events::BytesStart;

use super::MzIdError;

/// Get an unescaped attribute value, matching on the local (unprefixed) name
pub(super) fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, MzIdError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| MzIdError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// The `name`, `accession` and `value` of a cvParam element
#[derive(Debug, Default)]
pub(super) struct CvParam {
    pub accession: String,
    pub name: String,
    pub value: Option<String>,
}

pub(super) fn parse_cv_param(e: &BytesStart) -> Result<CvParam, MzIdError> {
    Ok(CvParam {
        accession: get_attribute(e, "accession")?.unwrap_or_default(),
        name: get_attribute(e, "name")?.unwrap_or_default(),
        value: get_attribute(e, "value")?,
    })
}

/// `spectrum title`
pub(super) const SPECTRUM_TITLE: &str = "MS:1000796";

/// `scan number(s)`
pub(super) const SCAN_NUMBERS: &str = "MS:1001115";

impl CvParam {
    pub(super) fn is(&self, accession: &str, name: &str) -> bool {
        self.accession == accession || self.name == name
    }
}
