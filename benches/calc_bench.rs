use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use earsiv::core::*;

fn lines(count: usize) -> Vec<RawLineItem> {
    (1..=count)
        .map(|i| {
            let builder = LineItemBuilder::new(format!("Kalem {i}"), dec!(3), dec!(19.99))
                .unit("ADET")
                .discount_rate(dec!(5))
                .vat_rate(dec!(20));
            match i % 3 {
                0 => builder.withholding("0003", dec!(20)),
                1 => builder
                    .other_tax("0071", dec!(25))
                    .reverse_charge("601", dec!(40)),
                _ => builder.other_tax_amount("4171", dec!(1.25)),
            }
            .build()
        })
        .collect()
}

fn bench_compute(c: &mut Criterion, name: &str, count: usize) {
    let raw = lines(count);
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut calc = InvoiceCalculator::new();
            calc.extend(black_box(&raw).iter().cloned());
            black_box(calc.calculate_totals())
        });
    });
}

fn bench_10_lines(c: &mut Criterion) {
    bench_compute(c, "compute_10_lines", 10);
}

fn bench_1000_lines(c: &mut Criterion) {
    bench_compute(c, "compute_1000_lines", 1000);
}

fn bench_totals_1000_lines(c: &mut Criterion) {
    let mut calc = InvoiceCalculator::new();
    calc.extend(lines(1000));
    c.bench_function("totals_1000_lines", |b| {
        b.iter(|| black_box(black_box(&calc).calculate_totals()));
    });
    c.bench_function("group_taxes_1000_lines", |b| {
        b.iter(|| black_box(black_box(&calc).group_taxes()));
    });
}

fn bench_validate_1000_lines(c: &mut Criterion) {
    let raw = lines(1000);
    c.bench_function("validate_1000_lines", |b| {
        b.iter(|| {
            let errors: Vec<_> = black_box(&raw)
                .iter()
                .enumerate()
                .flat_map(|(i, item)| validate_item(item, i))
                .collect();
            black_box(errors)
        });
    });
}

criterion_group!(
    benches,
    bench_10_lines,
    bench_1000_lines,
    bench_totals_1000_lines,
    bench_validate_1000_lines,
);
criterion_main!(benches);
