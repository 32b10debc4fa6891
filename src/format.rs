//! Text helpers for certificate rendering
//!
//! Small string helpers shared by the race and season certificates: ordinal
//! positions, the class/car line, track and driver name clean-up and download
//! names.

use crate::certificate::CertificateRecord;
use crate::season::SeasonRecord;

/// Shown when stripping trailing digits leaves nothing of a driver name.
pub const ALL_DIGITS_NAME: &str = "Your name is all numbers? That is cool!";

/// Ordinal text for a position: 1st, 2nd, 3rd, 4th, 11th, 21st.
pub fn ordinal(position: u32) -> String {
    let suffix = match (position % 10, position % 100) {
        (_, 10..=19) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{position}{suffix}")
}

/// Header text: the custom header when set, else the ordinal position.
pub fn position_text(position: u32, custom_header: &str) -> String {
    if custom_header.is_empty() { ordinal(position) } else { custom_header.to_string() }
}

/// Class and car line; the car is omitted when it is the class name.
pub fn car_text(class: &str, car_name: &str) -> String {
    if class == car_name { class.to_string() } else { format!("{class} | {car_name}") }
}

/// Track label without the `[Legacy] ` and `[Retired] ` markers.
pub fn track_text(track_name: &str) -> String {
    track_name.replacen("[Legacy] ", "", 1).replacen("[Retired] ", "", 1)
}

/// Remove trailing digits iRacing appends to duplicate display names.
///
/// A name with nothing left afterwards, the empty name included, becomes
/// [`ALL_DIGITS_NAME`].
pub fn strip_trailing_digits(name: &str) -> String {
    let stripped = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if stripped.is_empty() { ALL_DIGITS_NAME.to_string() } else { stripped.to_string() }
}

/// Download file name for a race certificate image.
pub fn race_file_name(record: &CertificateRecord) -> String {
    format!("{} {}.png", record.event, record.date)
}

/// Download file name for a season certificate image.
pub fn season_file_name(record: &SeasonRecord, year: i32, quarter: u8) -> String {
    format!(
        "{} {} {} {} {}.png",
        record.series, record.car_class, year, quarter, record.division
    )
}
