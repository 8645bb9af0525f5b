#![no_main]

use campus_web::models::{AcademicUnit, ContentItem, ListResponse, StaffProfile, Validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Deserialization and validation should only ever return Ok or Err
        if let Ok(list) = serde_json::from_value::<ListResponse<ContentItem>>(json.clone()) {
            let _ = list.validate();
        }
        if let Ok(list) = serde_json::from_value::<ListResponse<StaffProfile>>(json.clone()) {
            let _ = list.validate();
        }
        if let Ok(list) = serde_json::from_value::<ListResponse<AcademicUnit>>(json) {
            let _ = list.validate();
        }
    }
});
