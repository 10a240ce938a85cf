//! SQL extraction from saved query-log captures
//!
//! The BI tool's query log renders each event as a marker-delimited text
//! section. A capture of that page holds zero or more physical SQL sections
//! and zero or more logical SQL sections; the audit wants the longest of
//! each, with physical SQL trimmed to start at its leading WITH so page
//! chrome ahead of the statement is dropped.

/// Opens a physical SQL section in the log capture.
pub const PHYSICAL_SQL_MARKER: &str =
    "-------------------- Sending query to database named Oracle_Data_Warehouse";

/// Opens a logical SQL section in the log capture.
pub const LOGICAL_SQL_MARKER: &str = "-------------------- SQL Request, logical request hash:";

/// Every log section ends where the next one's dashes begin.
const SECTION_DELIMITER: &str = "--------------------";

/// Extract the physical SQL query from a log capture.
///
/// Scans every physical-SQL section, keeps candidates that contain a WITH
/// clause (anchored to start at it), and returns the longest. Returns `None`
/// when the capture holds no usable physical SQL.
pub fn extract_physical_sql(page_text: &str) -> Option<String> {
    sections(page_text, PHYSICAL_SQL_MARKER)
        .filter_map(|section| {
            let with_index = section.find("WITH")?;
            Some(section[with_index..].trim().to_string())
        })
        .max_by_key(String::len)
}

/// Extract the logical SQL request from a log capture: the longest
/// logical-SQL section, trimmed.
pub fn extract_logical_sql(page_text: &str) -> Option<String> {
    sections(page_text, LOGICAL_SQL_MARKER)
        .map(|section| section.trim().to_string())
        .max_by_key(String::len)
}

/// Iterate the bodies of all sections opened by `marker`, each running up to
/// the next section delimiter or the end of the capture.
fn sections<'a>(page_text: &'a str, marker: &'a str) -> impl Iterator<Item = &'a str> {
    let mut start = 0;
    std::iter::from_fn(move || {
        let marker_pos = page_text[start..].find(marker)? + start;
        let body_start = marker_pos + marker.len();
        let body_end = page_text[body_start..]
            .find(SECTION_DELIMITER)
            .map(|pos| body_start + pos)
            .unwrap_or(page_text.len());
        start = body_end;
        Some(&page_text[body_start..body_end])
    })
}
