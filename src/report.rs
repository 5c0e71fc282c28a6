use serde::Serialize;

use crate::types::{PackingResult, Piece, Rect};

/// Area and count figures for one packing result on one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utilization {
    pub sheet_area: f64,
    pub used_area: f64,
    pub waste_area: f64,
    #[serde(rename = "waste_percentage")]
    pub waste_percent: f64,
    pub utilization_percent: f64,
    pub total_pieces: u64,
    pub placed_count: usize,
    pub overflow_count: usize,
    pub fits: bool,
}

impl Utilization {
    pub fn new(result: &PackingResult, pieces: &[Piece], sheet: Rect) -> Self {
        let sheet_area = sheet.area();
        let used_area = result.used_area();
        let waste_area = sheet_area - used_area;
        let waste_percent = if sheet_area > 0.0 {
            waste_area / sheet_area * 100.0
        } else {
            0.0
        };

        Self {
            sheet_area,
            used_area,
            waste_area,
            waste_percent,
            utilization_percent: 100.0 - waste_percent,
            total_pieces: pieces.iter().map(|p| u64::from(p.quantity)).sum(),
            placed_count: result.placed.len(),
            overflow_count: result.overflow.len(),
            fits: result.overflow.is_empty(),
        }
    }
}

/// Legend entry for one requested piece.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceSummary {
    pub piece_id: usize,
    pub label: String,
    #[serde(flatten)]
    pub rect: Rect,
    pub requested: u32,
    pub placed: u32,
}

pub fn summarize_pieces(result: &PackingResult, pieces: &[Piece]) -> Vec<PieceSummary> {
    pieces
        .iter()
        .map(|piece| PieceSummary {
            piece_id: piece.id,
            label: piece.display_label(),
            rect: piece.rect,
            requested: piece.quantity,
            placed: result
                .placed
                .iter()
                .filter(|p| p.piece_id == piece.id)
                .count() as u32,
        })
        .collect()
}
