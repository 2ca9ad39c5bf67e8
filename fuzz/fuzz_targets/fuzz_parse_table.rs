#![no_main]
use libfuzzer_sys::fuzz_target;
use rmm_tools::model::{Action, Factor, Response};
use rmm_tools::pipeline::{parse_table, TableFormat};

/// Fuzz the input table parsers.
///
/// Every table type is parsed as both JSON and YAML; malformed input must
/// surface as an error, never a panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for format in [TableFormat::Json, TableFormat::Yaml] {
            let _ = parse_table::<Factor>(s, format);
            let _ = parse_table::<Response>(s, format);
            let _ = parse_table::<Action>(s, format);
        }
    }
});
