//! Turkish amount-in-words line printed on every e-Arşiv invoice.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::core::rounding::round_money;

const UNITS: [&str; 10] = [
    "", "Bir", "İki", "Üç", "Dört", "Beş", "Altı", "Yedi", "Sekiz", "Dokuz",
];
const TENS: [&str; 10] = [
    "", "On", "Yirmi", "Otuz", "Kırk", "Elli", "Altmış", "Yetmiş", "Seksen", "Doksan",
];
const SCALES: [&str; 10] = [
    "", "Bin", "Milyon", "Milyar", "Trilyon", "Katrilyon", "Kentilyon", "Seksilyon", "Septilyon",
    "Oktilyon",
];

/// Spell out a lira amount, e.g. `118.50` → `Yalnız YüzOnSekizTürkLirasıElliKuruş`.
///
/// Words are concatenated without spaces, as on the printed invoice. The
/// sign is ignored; kuruş are taken from the amount rounded to 2 dp.
pub fn amount_in_words(amount: Decimal) -> String {
    let amount = round_money(amount.abs());
    if amount.is_zero() {
        return "Yalnız SıfırTürkLirası".to_string();
    }

    let whole = amount.trunc();
    let kurus = ((amount - whole) * dec!(100)).trunc().to_u32().unwrap_or(0);
    let mut whole = whole.to_u128().unwrap_or(0);

    let mut text = String::new();
    if whole == 0 {
        text.push_str("Sıfır");
    } else {
        let mut scale = 0;
        while whole > 0 {
            let group = (whole % 1000) as u32;
            if group > 0 {
                // "Bin", never "BirBin".
                let words = if scale == 1 && group == 1 {
                    String::new()
                } else {
                    group_words(group)
                };
                text = format!("{words}{}{text}", SCALES[scale]);
            }
            whole /= 1000;
            scale += 1;
        }
    }
    text.push_str("TürkLirası");

    if kurus > 0 {
        text.push_str(&group_words(kurus));
        text.push_str("Kuruş");
    }

    format!("Yalnız {text}")
}

/// Words for 1..=999.
fn group_words(mut n: u32) -> String {
    let mut words = String::new();
    if n >= 100 {
        // "Yüz", never "BirYüz".
        if n >= 200 {
            words.push_str(UNITS[(n / 100) as usize]);
        }
        words.push_str("Yüz");
        n %= 100;
    }
    if n >= 10 {
        words.push_str(TENS[(n / 10) as usize]);
        n %= 10;
    }
    words.push_str(UNITS[n as usize]);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_words_cover_hundreds() {
        assert_eq!(group_words(1), "Bir");
        assert_eq!(group_words(10), "On");
        assert_eq!(group_words(100), "Yüz");
        assert_eq!(group_words(101), "YüzBir");
        assert_eq!(group_words(999), "DokuzYüzDoksanDokuz");
    }

    #[test]
    fn scales() {
        insta::assert_snapshot!(amount_in_words(dec!(1000)), @"Yalnız BinTürkLirası");
        insta::assert_snapshot!(amount_in_words(dec!(2000)), @"Yalnız İkiBinTürkLirası");
        insta::assert_snapshot!(amount_in_words(dec!(1001000)), @"Yalnız BirMilyonBinTürkLirası");
        insta::assert_snapshot!(amount_in_words(dec!(3000000000)), @"Yalnız ÜçMilyarTürkLirası");
    }

    #[test]
    fn kurus() {
        insta::assert_snapshot!(amount_in_words(dec!(118.50)), @"Yalnız YüzOnSekizTürkLirasıElliKuruş");
        insta::assert_snapshot!(amount_in_words(dec!(0.01)), @"Yalnız SıfırTürkLirasıBirKuruş");
        insta::assert_snapshot!(amount_in_words(dec!(106.2)), @"Yalnız YüzAltıTürkLirasıYirmiKuruş");
    }

    #[test]
    fn zero() {
        assert_eq!(amount_in_words(Decimal::ZERO), "Yalnız SıfırTürkLirası");
        assert_eq!(amount_in_words(dec!(0.001)), "Yalnız SıfırTürkLirası");
    }
}
