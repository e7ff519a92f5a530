// Text rendering for result listings and single colleges.
use crate::model::{CollegeRecord, FaqEntry};
use crate::normalizer::min_resolvable_fee;

pub const NO_MATCH_MESSAGE: &str = "📭 No colleges matched your filters.";

/// Upper bound on rendered lines per listing.
pub const MAX_LISTED: usize = 8;

/// One line per college, at most `MAX_LISTED` lines.
pub fn format_list(records: &[CollegeRecord]) -> String {
    if records.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    records
        .iter()
        .take(MAX_LISTED)
        .enumerate()
        .map(|(i, record)| format_line(i + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_line(position: usize, record: &CollegeRecord) -> String {
    let rank = record
        .rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let mut line = format!(
        "{}. {} - {}, {} | 🏆 Rank: {}",
        position,
        single_line(&record.name),
        single_line(&record.city),
        single_line(&record.state),
        rank
    );
    if let Some(fee) = min_resolvable_fee(record) {
        line.push_str(&format!(" | 💰 ~₹{}", format_thousands(fee)));
    }
    if record.has_maps() {
        line.push_str(" | 🗺️ Maps");
    }
    line
}

/// Collapses embedded line breaks so one record stays on one line.
fn single_line(field: &str) -> String {
    field.split(['\r', '\n']).filter(|part| !part.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Multi-line detail view of one college.
pub fn format_details(record: &CollegeRecord) -> String {
    let mut msg = format!("🎓 {}\n📍 {}, {}", record.name, record.city, record.state);
    if let Some(rank) = record.rank {
        msg.push_str(&format!("\n🏆 Rank: {}", rank));
    }
    if !record.courses.is_empty() {
        msg.push_str(&format!("\n📚 Courses: {}", record.courses.join(", ")));
    }
    match min_resolvable_fee(record) {
        Some(fee) => msg.push_str(&format!("\n💸 Fees from: ₹{}/year", format_thousands(fee))),
        None => msg.push_str("\n💸 Fees: not available"),
    }
    if let Some(website) = &record.website {
        msg.push_str(&format!("\n🌐 {}", website));
    }
    msg
}

pub fn format_faqs(faqs: &[FaqEntry]) -> String {
    if faqs.is_empty() {
        return "📭 No FAQs available.".to_string();
    }
    faqs.iter()
        .map(|faq| format!("❓ {}\n💬 {}", faq.q, faq.a))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
