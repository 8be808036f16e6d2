#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use quire::app::WebManifest;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(manifest) = WebManifest::from_json(raw, Path::new("fuzz.webmanifest")) {
            let _ = manifest.logo();
            let _ = serde_json::to_string(&manifest);
        }
    }
});
