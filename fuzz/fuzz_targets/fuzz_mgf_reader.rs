#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use mzweight::mgf::MgfReader;

fuzz_target!(|data: &[u8]| {
    // Malformed blocks are skipped and bad encodings are errors; neither may panic
    let mut reader = MgfReader::new(Cursor::new(data));
    for _ in 0..1000 {
        match reader.next_scan() {
            Ok(Some(scan)) => {
                let _ = scan.summed_intensity();
            }
            Ok(None) | Err(_) => break,
        }
    }
});
