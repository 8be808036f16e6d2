#![no_main]

use libfuzzer_sys::fuzz_target;
use quire::app::IconRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        if let Ok(request) = IconRequest::parse(name) {
            // Accepted names never carry path separators
            assert!(!request.name.contains('/'));
            let _ = request.sizes();
            let _ = request.content_type();
        }
    }
});
