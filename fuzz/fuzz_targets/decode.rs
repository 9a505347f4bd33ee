#![no_main]

use imgmeta::{decode, ReportWriter, TableWriter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(metadata) = decode(data) else {
        return;
    };

    let records: Vec<_> = metadata.records().iter().collect();
    let _ = TableWriter::new(true, false).write_records(&mut std::io::sink(), "fuzz", &records);
});
