use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PlanError;
use crate::report::{PieceSummary, Utilization, summarize_pieces};
use crate::solver::Solver;
use crate::types::{CutLine, Instance, Piece, PlacedPiece, Rect};

/// One row of the caller's cut list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PieceRequest {
    pub width: f64,
    pub height: f64,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub quantity: u32,
    #[serde(default)]
    pub label: Option<String>,
}

impl PieceRequest {
    pub fn new(width: f64, height: f64, quantity: u32) -> Self {
        Self {
            width,
            height,
            quantity,
            label: None,
        }
    }
}

/// Accepts any integral JSON number, so `2` and `2.0` both read as 2.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {value}"
        )));
    }
    Ok(value as u32)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutPlan {
    pub sheet: Rect,
    pub placed: Vec<PlacedPiece>,
    pub overflow: Vec<Instance>,
    pub cut_lines: Vec<CutLine>,
    pub metrics: Utilization,
    pub pieces: Vec<PieceSummary>,
}

/// Upper bound on the summed quantity of one request. Every unit becomes an
/// instance that each of the packing attempts walks, so the limit bounds both
/// memory and time per plan.
pub const MAX_INSTANCES: u64 = 10_000;

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn validate(requests: &[PieceRequest], sheet: Rect) -> Result<Vec<Piece>, PlanError> {
    if !is_positive(sheet.w) || !is_positive(sheet.h) {
        return Err(PlanError::InvalidSheet {
            width: sheet.w,
            height: sheet.h,
        });
    }

    let total: u64 = requests.iter().map(|r| u64::from(r.quantity)).sum();
    if total > MAX_INSTANCES {
        return Err(PlanError::TooManyPieces {
            total,
            max: MAX_INSTANCES,
        });
    }

    requests
        .iter()
        .enumerate()
        .map(|(index, r)| {
            if !is_positive(r.width) || !is_positive(r.height) {
                return Err(PlanError::InvalidPiece {
                    index,
                    width: r.width,
                    height: r.height,
                });
            }
            if r.quantity == 0 {
                return Err(PlanError::ZeroQuantity { index });
            }
            Ok(Piece {
                id: index,
                rect: Rect::new(r.width, r.height),
                quantity: r.quantity,
                label: r.label.clone(),
            })
        })
        .collect()
}

/// Plans the cuts for `requests` on one `sheet_width` x `sheet_height`
/// sheet. Non-positive or non-finite dimensions, zero quantities and more
/// than [`MAX_INSTANCES`] units in total are rejected; pieces that do not fit
/// are returned in `overflow`.
pub fn compute_cut_plan(
    requests: &[PieceRequest],
    sheet_width: f64,
    sheet_height: f64,
) -> Result<CutPlan, PlanError> {
    let sheet = Rect::new(sheet_width, sheet_height);
    let pieces = validate(requests, sheet)?;

    let solver = Solver::new(sheet, pieces);
    let result = solver.solve();
    let pieces = solver.pieces();
    let metrics = Utilization::new(&result, pieces, sheet);
    let summary = summarize_pieces(&result, pieces);

    tracing::info!(
        sheet = %sheet,
        pieces = metrics.total_pieces,
        placed = metrics.placed_count,
        overflow = metrics.overflow_count,
        waste_percent = metrics.waste_percent,
        "cut plan computed"
    );

    Ok(CutPlan {
        sheet,
        placed: result.placed,
        overflow: result.overflow,
        cut_lines: result.cut_lines,
        metrics,
        pieces: summary,
    })
}
