#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(markup) = std::str::from_utf8(data) {
        let _ = quire::assets::extract_svg_elements(markup, "fuzz.svg");
    }
});
