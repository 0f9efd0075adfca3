use std::collections::HashSet;

pub type Identifier = u64;

/// Parse a newline-delimited identifier list.
///
/// Lines are trimmed; blank lines and lines that are not a plain decimal
/// number are skipped. Repeated identifiers keep their first position.
pub fn parse_identifiers(raw: &str) -> Vec<Identifier> {
    let mut seen = HashSet::new();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|line| line.parse::<Identifier>().ok())
        .filter(|id| seen.insert(*id))
        .collect()
}
