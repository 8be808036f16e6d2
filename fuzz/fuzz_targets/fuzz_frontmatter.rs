#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let file = Path::new("fuzz.md");
        if let Ok(extracted) = quire::extract_frontmatter(content, file) {
            let _ = quire::parse_frontmatter(&extracted.yaml, file);
        }
    }
});
