//! Scan number extraction from spectrum titles and native IDs.
//!
//! Common formats:
//! - `scan=12345`
//! - `controllerType=0 controllerNumber=1 scan=12345`
//! - `run.raw, NativeID:"controllerType=0 controllerNumber=1 scan=12345"`
//! - `NativeID:&quot;...scan=12345&quot;` (escaped quotes left in by some converters)

/// Extract the scan number following a `scan=` token.
///
/// Quotes and `&quot;` entities around the number are ignored. Returns `None`
/// if there is no `scan=` token or it is not followed by digits.
pub fn from_native_id(text: &str) -> Option<u64> {
    let pos = text.find("scan=")?;
    let mut rest = &text[pos + 5..];
    loop {
        if let Some(stripped) = rest.strip_prefix('"') {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("&quot;") {
            rest = stripped;
        } else {
            break;
        }
    }
    leading_number(rest)
}

/// Parse the value of an MGF `SCANS=` header.
///
/// Ranges (`100-105`) and lists (`100,101`) resolve to their first scan.
pub fn from_scans_header(value: &str) -> Option<u64> {
    leading_number(value.trim())
}

fn leading_number(text: &str) -> Option<u64> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_native_ids() {
        assert_eq!(from_native_id("scan=999"), Some(999));
        assert_eq!(
            from_native_id("controllerType=0 controllerNumber=1 scan=12345"),
            Some(12345)
        );
        assert_eq!(
            from_native_id(r#"run.1.1. File:"run.raw", NativeID:"controllerType=0 controllerNumber=1 scan=42""#),
            Some(42)
        );
    }

    #[test]
    fn test_quoted_scan_numbers() {
        assert_eq!(from_native_id(r#"scan="77""#), Some(77));
        assert_eq!(from_native_id("NativeID:&quot;scan=88&quot;"), Some(88));
    }

    #[test]
    fn test_missing_scan_numbers() {
        assert_eq!(from_native_id("index=5"), None);
        assert_eq!(from_native_id("scan=abc"), None);
        assert_eq!(from_native_id(""), None);
    }

    #[test]
    fn test_scans_header() {
        assert_eq!(from_scans_header("1503"), Some(1503));
        assert_eq!(from_scans_header(" 100-105 "), Some(100));
        assert_eq!(from_scans_header("7,8"), Some(7));
        assert_eq!(from_scans_header("n/a"), None);
    }
}
