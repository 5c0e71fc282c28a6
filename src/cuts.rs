use std::collections::HashSet;

use crate::types::CutLine;

/// Coordinates rounded to one decimal place, as fixed-point tenths.
fn line_key(line: &CutLine) -> [i64; 4] {
    [line.x1, line.y1, line.x2, line.y2].map(|v| (v * 10.0).round() as i64)
}

/// Drops lines whose endpoints match an earlier line to one decimal place.
pub fn dedup_cut_lines(lines: Vec<CutLine>) -> Vec<CutLine> {
    let mut seen = HashSet::with_capacity(lines.len());
    lines
        .into_iter()
        .filter(|line| seen.insert(line_key(line)))
        .collect()
}
