use chrono::{DateTime, FixedOffset, Utc};

const INDONESIAN_MONTHS: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

/// Format whole rupiah with Indonesian thousand separators: `Rp 1.000.000`
pub fn format_rupiah(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Render a timestamp the way the mobile screens did:
/// `17 Agustus 2023 17:10 WIB` (Western Indonesian Time, UTC+7)
pub fn format_datetime_wib(dt: DateTime<Utc>) -> String {
    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    let local = dt.with_timezone(&wib);
    use chrono::Datelike;
    use chrono::Timelike;
    format!(
        "{} {} {} {:02}:{:02} WIB",
        local.day(),
        INDONESIAN_MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}
