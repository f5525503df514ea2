use super::domain::ListingStatus;

/// Renders a whole-dollar price with thousands separators; rentals get a monthly suffix.
pub fn format_price(price: u64, status: ListingStatus) -> String {
    let amount = format!("${}", group_thousands(price));
    match status {
        ListingStatus::ForRent => format!("{amount}/month"),
        ListingStatus::ForSale | ListingStatus::Sold => amount,
    }
}

/// Short label used on slider bounds and filter chips (`$1.2M`, `$500K`).
pub fn compact_price(price: u64) -> String {
    if price >= 1_000_000 {
        format!("${:.1}M", price as f64 / 1_000_000.0)
    } else if price >= 1_000 {
        format!("${:.0}K", price as f64 / 1_000.0)
    } else {
        format!("${price}")
    }
}

pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
