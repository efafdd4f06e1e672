//! Integer-first number formatting for tables and tooltips.

/// Thousands separators: `1234567` → `"1,234,567"`. Negative values keep the sign.
pub fn int_with_commas(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `num / den` as a percentage with two decimals, rounded half-up: `"12.35%"`.
/// A zero denominator yields `"0.00%"`.
pub fn percent_2dp(num: u64, den: u64) -> String {
    if den == 0 {
        return "0.00%".to_string();
    }
    // hundredths of a percent, doubled so that +1 then /2 rounds half-up
    let twice = (num as u128) * 20_000 / (den as u128);
    let hundredths = (twice + 1) / 2;
    format!("{}.{:02}%", hundredths / 100, hundredths % 100)
}

/// Lean bucket in steps of 5: `floor(dem / (dem + gop) * 20) * 5`, in 0..=100.
/// `None` when neither category has votes.
pub fn lean_bucket(dem: u64, gop: u64) -> Option<u8> {
    let two = (dem as u128) + (gop as u128);
    if two == 0 {
        return None;
    }
    Some(((dem as u128 * 20 / two) * 5) as u8)
}
