//! File helpers shared by the parsers and writers.
//!
//! Every input may be plain text or gzip-compressed; compression is detected
//! from the `.gz` extension.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Buffer size used for all file readers
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Returns true if the path carries a `.gz` extension
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open a (possibly gzip-compressed) text file for buffered reading
pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::with_capacity(
            DEFAULT_INPUT_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(
            DEFAULT_INPUT_BUFFER_SIZE,
            file,
        )))
    }
}

/// Create an output file, or stdout when the path is `-`
pub fn create_output<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Write>> {
    let path = path.as_ref();
    if path.as_os_str() == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Read;

    #[test]
    fn test_gz_detection() {
        assert!(is_gzipped(Path::new("run.mgf.gz")));
        assert!(is_gzipped(Path::new("run.mgf.GZ")));
        assert!(!is_gzipped(Path::new("run.mgf")));
        assert!(!is_gzipped(Path::new("gz")));
    }

    #[test]
    fn test_open_gzipped_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.mgf.gz");

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"BEGIN IONS\nEND IONS\n").unwrap();
        encoder.finish().unwrap();

        let mut content = String::new();
        open_input(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "BEGIN IONS\nEND IONS\n");
    }
}
