use chrono::NaiveDate;
use earsiv::core::*;
use earsiv::payload::build_payload;
use rust_decimal_macros::dec;

fn main() {
    // A sale to a company with one reverse-charged service line
    let issued_at = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();

    let draft = InvoiceDraftBuilder::new(issued_at)
        .receiver(
            ReceiverBuilder::new("1234567890")
                .title("ACME Bilişim A.Ş.")
                .tax_office("Kadıköy")
                .address("Moda Cad. No:1")
                .district("Kadıköy")
                .city("İstanbul")
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Yazılım geliştirme", dec!(80), dec!(750))
                .unit("SAAT")
                .vat_rate(dec!(20))
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Bina temizliği", dec!(1), dec!(12000))
                .vat_rate(dec!(20))
                .discount_rate(dec!(5))
                .reverse_charge("613", dec!(90))
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Ofis kirası", dec!(1), dec!(25000))
                .vat_rate(dec!(20))
                .withholding("0003", dec!(20))
                .build(),
        )
        .note("Ödeme 30 gün içinde yapılacaktır.")
        .build()
        .expect("draft should be valid");

    let payload = build_payload(&draft, &TaxCodeTable::default()).expect("payload should build");

    println!("Type:      {}", payload.invoice_type.code());
    println!("Date:      {} {}", payload.date, payload.time);
    println!("Buyer:     {}", payload.buyer_title);
    println!("---");
    for product in &payload.products {
        println!(
            "  {} x {} {} @ {} = {} (KDV {})",
            product.quantity,
            product.unit_type,
            product.name,
            product.unit_price,
            product.total_amount,
            product.vat_amount
        );
    }
    println!("---");
    println!("Matrah:    {} TRY", payload.base);
    println!("KDV:       {} TRY", payload.calculated_vat);
    println!("Vergiler:  {} TRY", payload.total_taxes);
    println!("Toplam:    {} TRY", payload.included_taxes_total_price);
    println!("Ödenecek:  {} TRY", payload.payment_price);
    for tax in &payload.taxes {
        println!("  {}: {}", tax.tax_code, tax.total_tax_amount);
    }
    println!("{}", payload.note);
}
