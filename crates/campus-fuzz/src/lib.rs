//! Fuzzing library for campus-web.
//!
//! Targets cover the two places untrusted input enters the site: query
//! strings typed or shared by visitors, and JSON bodies from the content API.
//!
//! # Usage
//!
//! ```bash
//! cd crates/campus-fuzz
//! cargo +nightly fuzz run fuzz_query_parse -- -max_total_time=60
//! ```

pub use campus_web::{filters, models, pages};
