#![no_main]

use campus_web::filters::QueryState;
use campus_web::pages::Section;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    for section in Section::ALL {
        let state = QueryState::parse(&format!("/en/{section}?{query}"), section.schema());
        // The canonical href must be a fixed point.
        let href = state.href();
        assert_eq!(QueryState::parse(&href, section.schema()).href(), href);
        assert!(state.filters().page >= 1);
    }
});
