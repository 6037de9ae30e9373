use super::*;

// -----------------------------------------------------------------------
// normalize_price
// -----------------------------------------------------------------------

#[test]
fn million_marker_means_ten_thousand_dinars() {
    assert_eq!(normalize_price("6m"), Some(60_000));
    assert_eq!(normalize_price("6M"), Some(60_000));
    assert_eq!(normalize_price("12.5m"), Some(125_000));
    assert_eq!(normalize_price("1,5m"), Some(15_000));
}

#[test]
fn spelled_out_millions_use_the_same_rule() {
    assert_eq!(normalize_price("6 millions"), Some(60_000));
    assert_eq!(normalize_price("13 Million DA"), Some(130_000));
}

#[test]
fn thousand_marker_means_thousand_dinars() {
    assert_eq!(normalize_price("60k"), Some(60_000));
    assert_eq!(normalize_price("60K DA"), Some(60_000));
    assert_eq!(normalize_price("7.5k"), Some(7_500));
}

#[test]
fn bare_short_numeral_is_read_as_millions() {
    assert_eq!(normalize_price("6"), Some(60_000));
    assert_eq!(normalize_price("13"), Some(130_000));
    assert_eq!(normalize_price(" 6 "), Some(60_000));
}

#[test]
fn plain_amounts_parse_as_integers() {
    assert_eq!(normalize_price("60000"), Some(60_000));
    assert_eq!(normalize_price("62 000 DA"), Some(62_000));
    assert_eq!(normalize_price("150000 DZD"), Some(150_000));
    assert_eq!(normalize_price("150,000"), Some(150_000));
    assert_eq!(normalize_price("150.000 da"), Some(150_000));
    assert_eq!(normalize_price("120\u{a0}000\u{a0}DA"), Some(120_000));
}

#[test]
fn decimal_cents_are_not_read_as_digits() {
    assert_eq!(normalize_price("150000.00"), Some(150_000));
    assert_eq!(normalize_price("150 000,00 DA"), Some(150_000));
    assert_eq!(normalize_price("150,000.00 DZD"), Some(150_000));
    // Three digits after the separator is a thousands group.
    assert_eq!(normalize_price("150.000"), Some(150_000));
}

#[test]
fn three_digit_amounts_are_not_scaled() {
    assert_eq!(normalize_price("500"), Some(500));
}

#[test]
fn zero_normalizes_to_zero() {
    assert_eq!(normalize_price("0"), Some(0));
}

#[test]
fn non_numeric_text_is_none() {
    assert_eq!(normalize_price("abc"), None);
    assert_eq!(normalize_price("free"), None);
    assert_eq!(normalize_price("Prix à débattre"), None);
    assert_eq!(normalize_price("62000 DA négociable"), None);
}

#[test]
fn marker_without_numeral_is_none() {
    assert_eq!(normalize_price("contactez-moi"), None);
    assert_eq!(normalize_price("k"), None);
}

#[test]
fn empty_and_whitespace_are_none() {
    assert_eq!(normalize_price(""), None);
    assert_eq!(normalize_price("   "), None);
    assert_eq!(normalize_price("DA"), None);
}

#[test]
fn overflowing_amounts_are_none() {
    assert_eq!(normalize_price("99999999999999999999999"), None);
}

#[test]
fn k_suffix_property_holds_for_sample_range() {
    for n in [1_i64, 9, 45, 60, 250, 999] {
        assert_eq!(normalize_price(&format!("{n}k")), Some(n * 1_000), "{n}k");
        assert_eq!(normalize_price(&format!("{n}M")), Some(n * 10_000), "{n}M");
    }
    for n in 1_i64..=99 {
        assert_eq!(normalize_price(&n.to_string()), Some(n * 10_000), "{n}");
    }
}

// -----------------------------------------------------------------------
// effective_price_text
// -----------------------------------------------------------------------

#[test]
fn sale_price_wins_over_regular_price() {
    let text = effective_price_text("160,000 DZD 150,000 DZD").unwrap();
    assert_eq!(text, "150,000");
    assert_eq!(normalize_price(&text), Some(150_000));
}

#[test]
fn minor_units_are_dropped() {
    let text = effective_price_text("150,000.00 DA").unwrap();
    assert_eq!(normalize_price(&text), Some(150_000));
    let text = effective_price_text("16,500,00 DA").unwrap();
    assert_eq!(normalize_price(&text), Some(16_500));
}

#[test]
fn spaced_groups_stay_together() {
    let text = effective_price_text("Prix : 62 000 DA").unwrap();
    assert_eq!(normalize_price(&text), Some(62_000));
}

#[test]
fn text_without_digits_has_no_amount() {
    assert_eq!(effective_price_text("Rupture de stock"), None);
}
