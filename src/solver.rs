use std::cmp::Ordering;

use crate::cuts::dedup_cut_lines;
use crate::guillotine::{SplitPolicy, pack};
use crate::types::{Instance, PackingResult, Piece, Rect};

/// Instance orderings tried by the search. Every order is descending and
/// stable, so equal instances keep their expanded order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Area,
    LongerSide,
    HeightThenWidth,
    WidthThenHeight,
    Perimeter,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Area,
        SortOrder::LongerSide,
        SortOrder::HeightThenWidth,
        SortOrder::WidthThenHeight,
        SortOrder::Perimeter,
    ];

    fn compare(self, a: &Instance, b: &Instance) -> Ordering {
        let (a, b) = (a.rect, b.rect);
        match self {
            SortOrder::Area => b.area().total_cmp(&a.area()),
            SortOrder::LongerSide => b.w.max(b.h).total_cmp(&a.w.max(a.h)),
            SortOrder::HeightThenWidth => b.h.total_cmp(&a.h).then(b.w.total_cmp(&a.w)),
            SortOrder::WidthThenHeight => b.w.total_cmp(&a.w).then(b.h.total_cmp(&a.h)),
            SortOrder::Perimeter => (b.w + b.h).total_cmp(&(a.w + a.h)),
        }
    }

    pub fn sorted(self, instances: &[Instance]) -> Vec<Instance> {
        let mut sorted = instances.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

/// One instance per unit of quantity, in piece order then ascending index.
pub fn expand_pieces(pieces: &[Piece]) -> Vec<Instance> {
    pieces
        .iter()
        .flat_map(|p| {
            (0..p.quantity).map(move |index| Instance {
                piece_id: p.id,
                index,
                rect: p.rect,
            })
        })
        .collect()
}

/// More placed pieces always wins; placed area breaks ties. This orders
/// attempts the same way as `count * K + area` with `K` above the sheet area.
fn is_better(candidate: &PackingResult, best: &PackingResult) -> bool {
    match candidate.placed.len().cmp(&best.placed.len()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate.used_area() > best.used_area(),
    }
}

pub struct Solver {
    sheet: Rect,
    pieces: Vec<Piece>,
}

impl Solver {
    pub fn new(sheet: Rect, pieces: Vec<Piece>) -> Self {
        Self { sheet, pieces }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Runs the packer over every sort order and split policy, on the sheet
    /// as given and, for non-square sheets, on the transposed sheet. The
    /// first attempt with the highest score is kept.
    pub fn solve(&self) -> PackingResult {
        let instances = expand_pieces(&self.pieces);
        let mut best: Option<PackingResult> = None;

        for order in SortOrder::ALL {
            let sorted = order.sorted(&instances);
            for policy in SplitPolicy::ALL {
                let normal = pack(&sorted, self.sheet, policy);
                Self::consider(&mut best, normal, order, policy, false);

                if !self.sheet.is_square() {
                    let transposed = pack(&sorted, self.sheet.rotated(), policy).transposed();
                    Self::consider(&mut best, transposed, order, policy, true);
                }
            }
        }

        let mut best = best.unwrap_or_default();
        best.cut_lines = dedup_cut_lines(best.cut_lines);
        best
    }

    fn consider(
        best: &mut Option<PackingResult>,
        candidate: PackingResult,
        order: SortOrder,
        policy: SplitPolicy,
        transposed: bool,
    ) {
        tracing::debug!(
            ?order,
            ?policy,
            transposed,
            placed = candidate.placed.len(),
            area = candidate.used_area(),
            "packing attempt"
        );
        if best.as_ref().is_none_or(|b| is_better(&candidate, b)) {
            *best = Some(candidate);
        }
    }
}

pub fn find_best_packing(pieces: &[Piece], sheet: Rect) -> PackingResult {
    Solver::new(sheet, pieces.to_vec()).solve()
}
