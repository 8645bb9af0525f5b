#![no_main]

use campus_web::models::{MediaRef, MediaSize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(media) = serde_json::from_slice::<MediaRef>(data) {
        let resolved = media.resolve(MediaSize::Medium, "/static/placeholder.svg");
        assert!(!resolved.src.is_empty());
    }
});
