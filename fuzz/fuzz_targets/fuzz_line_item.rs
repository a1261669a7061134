#![no_main]

use earsiv::core::{InvoiceCalculator, RawLineItem};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Form JSON is untrusted. Rejection is fine, panics are bugs.
    let Ok(items) = serde_json::from_slice::<Vec<RawLineItem>>(data) else {
        return;
    };
    let mut strict = InvoiceCalculator::new();
    let mut permissive = InvoiceCalculator::new();
    for item in items.iter().take(10_000) {
        let _ = strict.add_item_strict(item);
        permissive.add_item(item);
    }
    for calc in [&strict, &permissive] {
        let _ = calc.calculate_totals();
        let _ = calc.group_taxes();
    }
});
