#![no_main]

use earsiv::core::{InvoiceDraft, TaxCodeTable, validate_invoice};
use earsiv::payload::build_payload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(draft) = serde_json::from_slice::<InvoiceDraft>(data) else {
        return;
    };
    if draft.items.len() > 10_000 || !validate_invoice(&draft).is_empty() {
        return;
    }
    if let Ok(payload) = build_payload(&draft, &TaxCodeTable::default()) {
        let _ = payload.to_json();
    }
});
