use crate::types::{CutLine, FreeRect, Instance, PackingResult, PlacedPiece, Rect};

/// Decides which way the L-shaped leftover of a free rectangle is cut after
/// a piece lands in its corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    Longer,
    Shorter,
    Area,
    Horizontal,
    Vertical,
}

impl SplitPolicy {
    pub const ALL: [SplitPolicy; 5] = [
        SplitPolicy::Longer,
        SplitPolicy::Shorter,
        SplitPolicy::Area,
        SplitPolicy::Horizontal,
        SplitPolicy::Vertical,
    ];

    fn split_horizontally(self, free: Rect, used: Rect) -> bool {
        let right_w = free.w - used.w;
        let bottom_h = free.h - used.h;
        match self {
            SplitPolicy::Longer => free.w >= free.h,
            SplitPolicy::Shorter => bottom_h <= right_w,
            SplitPolicy::Area => {
                let horizontal = f64::max(free.w * bottom_h, right_w * used.h);
                let vertical = f64::max(used.w * bottom_h, right_w * free.h);
                horizontal >= vertical
            }
            SplitPolicy::Horizontal => true,
            SplitPolicy::Vertical => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuillotineBin {
    policy: SplitPolicy,
    pub free_rects: Vec<FreeRect>,
    pub placements: Vec<PlacedPiece>,
    pub cut_lines: Vec<CutLine>,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPlacement {
    pub free_idx: usize,
    pub rotated: bool,
    pub score: f64,
}

impl GuillotineBin {
    pub fn new(sheet: Rect, policy: SplitPolicy) -> Self {
        Self {
            policy,
            free_rects: vec![FreeRect {
                x: 0.0,
                y: 0.0,
                rect: sheet,
            }],
            placements: Vec::new(),
            cut_lines: Vec::new(),
        }
    }

    /// Best short-side fit over every free rectangle in both orientations.
    /// Only a strictly lower score replaces the current best, so ties go to
    /// the earlier rectangle and to the unrotated orientation.
    pub fn find_best(&self, piece: Rect) -> Option<ScoredPlacement> {
        let mut best: Option<ScoredPlacement> = None;

        for (idx, free) in self.free_rects.iter().enumerate() {
            for rotated in [false, true] {
                let candidate = if rotated { piece.rotated() } else { piece };
                if !candidate.fits_in(&free.rect) {
                    continue;
                }
                let score = Self::score(candidate, free.rect);
                if best.is_none_or(|b| score < b.score) {
                    best = Some(ScoredPlacement {
                        free_idx: idx,
                        rotated,
                        score,
                    });
                }
            }
        }

        best
    }

    fn score(piece: Rect, free: Rect) -> f64 {
        f64::min(free.w - piece.w, free.h - piece.h)
    }

    pub fn place(&mut self, scored: ScoredPlacement, instance: Instance) -> PlacedPiece {
        let free = self.free_rects.remove(scored.free_idx);
        let used = if scored.rotated {
            instance.rect.rotated()
        } else {
            instance.rect
        };

        let placement = PlacedPiece {
            piece_id: instance.piece_id,
            index: instance.index,
            x: free.x,
            y: free.y,
            rect: used,
            rotated: scored.rotated,
        };

        self.split(free, used);
        self.placements.push(placement);
        self.free_rects.sort_by(|a, b| a.rect.area().total_cmp(&b.rect.area()));

        placement
    }

    fn split(&mut self, free: FreeRect, used: Rect) {
        let right_w = free.rect.w - used.w;
        let bottom_h = free.rect.h - used.h;

        let horizontal = match (right_w > 0.0, bottom_h > 0.0) {
            (false, false) => return,
            (true, false) => false,
            (false, true) => true,
            (true, true) => self.policy.split_horizontally(free.rect, used),
        };

        let cut_x = free.x + used.w;
        let cut_y = free.y + used.h;

        if horizontal {
            self.cut_lines
                .push(CutLine::horizontal(cut_y, free.x, free.x + free.rect.w));
            if right_w > 0.0 {
                self.cut_lines.push(CutLine::vertical(cut_x, free.y, cut_y));
                self.free_rects.push(FreeRect {
                    x: cut_x,
                    y: free.y,
                    rect: Rect::new(right_w, used.h),
                });
            }
            if bottom_h > 0.0 {
                self.free_rects.push(FreeRect {
                    x: free.x,
                    y: cut_y,
                    rect: Rect::new(free.rect.w, bottom_h),
                });
            }
        } else {
            self.cut_lines
                .push(CutLine::vertical(cut_x, free.y, free.y + free.rect.h));
            if bottom_h > 0.0 {
                self.cut_lines.push(CutLine::horizontal(cut_y, free.x, cut_x));
                self.free_rects.push(FreeRect {
                    x: free.x,
                    y: cut_y,
                    rect: Rect::new(used.w, bottom_h),
                });
            }
            if right_w > 0.0 {
                self.free_rects.push(FreeRect {
                    x: cut_x,
                    y: free.y,
                    rect: Rect::new(right_w, free.rect.h),
                });
            }
        }
    }
}

/// Packs `instances` in the given order onto one sheet. Instances that fit
/// in no free rectangle go to `overflow`; the cut lines are returned raw.
pub fn pack(instances: &[Instance], sheet: Rect, policy: SplitPolicy) -> PackingResult {
    let mut bin = GuillotineBin::new(sheet, policy);
    let mut overflow = Vec::new();

    for &instance in instances {
        match bin.find_best(instance.rect) {
            Some(scored) => {
                bin.place(scored, instance);
            }
            None => overflow.push(instance),
        }
    }

    PackingResult {
        placed: bin.placements,
        overflow,
        cut_lines: bin.cut_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(piece_id: usize, w: f64, h: f64) -> Instance {
        Instance {
            piece_id,
            index: 0,
            rect: Rect::new(w, h),
        }
    }

    fn free(x: f64, y: f64, w: f64, h: f64) -> FreeRect {
        FreeRect {
            x,
            y,
            rect: Rect::new(w, h),
        }
    }

    #[test]
    fn test_place_single_piece_horizontal_split() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Longer);
        let piece = instance(0, 50.0, 30.0);
        let scored = bin.find_best(piece.rect).unwrap();
        let p = bin.place(scored, piece);
        assert_eq!((p.x, p.y), (0.0, 0.0));
        assert!(!p.rotated);
        assert_eq!(
            bin.cut_lines,
            vec![
                CutLine::horizontal(30.0, 0.0, 100.0),
                CutLine::vertical(50.0, 0.0, 30.0),
            ]
        );
        // Sorted by area: the 50x30 strip comes before the 100x70 block.
        assert_eq!(
            bin.free_rects,
            vec![free(50.0, 0.0, 50.0, 30.0), free(0.0, 30.0, 100.0, 70.0)]
        );
    }

    #[test]
    fn test_vertical_split() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Vertical);
        let piece = instance(0, 50.0, 30.0);
        let scored = bin.find_best(piece.rect).unwrap();
        bin.place(scored, piece);
        assert_eq!(
            bin.cut_lines,
            vec![
                CutLine::vertical(50.0, 0.0, 100.0),
                CutLine::horizontal(30.0, 0.0, 50.0),
            ]
        );
        assert_eq!(
            bin.free_rects,
            vec![free(0.0, 30.0, 50.0, 70.0), free(50.0, 0.0, 50.0, 100.0)]
        );
    }

    #[test]
    fn test_forced_axis_ignores_policy() {
        // Full-width piece: only the bottom leftover remains.
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Vertical);
        let piece = instance(0, 100.0, 30.0);
        let scored = bin.find_best(piece.rect).unwrap();
        bin.place(scored, piece);
        assert_eq!(bin.cut_lines, vec![CutLine::horizontal(30.0, 0.0, 100.0)]);
        assert_eq!(bin.free_rects, vec![free(0.0, 30.0, 100.0, 70.0)]);

        // Full-height piece: only the right leftover remains.
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Horizontal);
        let piece = instance(0, 40.0, 100.0);
        let scored = bin.find_best(piece.rect).unwrap();
        bin.place(scored, piece);
        assert_eq!(bin.cut_lines, vec![CutLine::vertical(40.0, 0.0, 100.0)]);
        assert_eq!(bin.free_rects, vec![free(40.0, 0.0, 60.0, 100.0)]);
    }

    #[test]
    fn test_split_policy_choices() {
        let free = Rect::new(100.0, 100.0);
        let used = Rect::new(60.0, 20.0);
        // right_w = 40, bottom_h = 80
        assert!(SplitPolicy::Longer.split_horizontally(free, used));
        assert!(!SplitPolicy::Shorter.split_horizontally(free, used));
        // horizontal keeps a 100x80 block, vertical at best a 60x80 one
        assert!(SplitPolicy::Area.split_horizontally(free, used));
        assert!(SplitPolicy::Horizontal.split_horizontally(free, used));
        assert!(!SplitPolicy::Vertical.split_horizontally(free, used));

        let tall = Rect::new(50.0, 100.0);
        assert!(!SplitPolicy::Longer.split_horizontally(tall, Rect::new(10.0, 10.0)));
        assert!(SplitPolicy::Shorter.split_horizontally(tall, Rect::new(10.0, 90.0)));
        assert!(!SplitPolicy::Area.split_horizontally(free, Rect::new(20.0, 60.0)));
    }

    fn overlaps(ax: f64, ay: f64, a: Rect, bx: f64, by: f64, b: Rect) -> bool {
        ax < bx + b.w && bx < ax + a.w && ay < by + b.h && by < ay + a.h
    }

    /// Free rectangles and placed pieces must tile the sheet: their areas add
    /// up to the sheet area and no two of them share interior points.
    fn assert_partition(bin: &GuillotineBin, sheet: Rect) {
        let free_area: f64 = bin.free_rects.iter().map(|f| f.rect.area()).sum();
        let used_area: f64 = bin.placements.iter().map(|p| p.rect.area()).sum();
        assert_eq!(free_area + used_area, sheet.area());

        for (i, a) in bin.free_rects.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.rect.w <= sheet.w && a.y + a.rect.h <= sheet.h);
            for b in &bin.free_rects[i + 1..] {
                assert!(
                    !overlaps(a.x, a.y, a.rect, b.x, b.y, b.rect),
                    "free rects {:?} and {:?} overlap",
                    a,
                    b
                );
            }
            for p in &bin.placements {
                assert!(
                    !overlaps(a.x, a.y, a.rect, p.x, p.y, p.rect),
                    "free rect {:?} overlaps placed piece {:?}",
                    a,
                    p
                );
            }
        }
    }

    #[test]
    fn test_free_rects_partition_sheet() {
        let sheet = Rect::new(275.0, 185.0);
        let instances = [
            instance(0, 120.0, 80.0),
            instance(1, 80.0, 50.0),
            instance(2, 60.0, 60.0),
            instance(3, 60.0, 60.0),
            instance(4, 185.0, 30.0),
            instance(5, 45.0, 20.0),
            instance(6, 30.0, 90.0),
            instance(7, 25.0, 25.0),
            instance(8, 300.0, 10.0),
            instance(9, 15.0, 40.0),
        ];

        for policy in SplitPolicy::ALL {
            let mut bin = GuillotineBin::new(sheet, policy);
            assert_partition(&bin, sheet);
            for &piece in &instances {
                if let Some(scored) = bin.find_best(piece.rect) {
                    bin.place(scored, piece);
                }
                assert_partition(&bin, sheet);
            }
            // Only the 300-long strip fits nowhere.
            assert_eq!(bin.placements.len(), 9, "{:?}", policy);
        }
    }

    #[test]
    fn test_piece_too_large() {
        let bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Longer);
        assert!(bin.find_best(Rect::new(200.0, 50.0)).is_none());
    }

    #[test]
    fn test_rotation_fit() {
        let bin = GuillotineBin::new(Rect::new(50.0, 100.0), SplitPolicy::Longer);
        let scored = bin.find_best(Rect::new(90.0, 40.0)).unwrap();
        assert!(scored.rotated);
        assert_eq!(scored.score, 10.0);
    }

    #[test]
    fn test_tie_prefers_unrotated_then_first_rect() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Longer);
        // Square piece: both orientations score the same.
        let scored = bin.find_best(Rect::new(30.0, 30.0)).unwrap();
        assert!(!scored.rotated);

        bin.free_rects = vec![free(0.0, 0.0, 40.0, 40.0), free(50.0, 50.0, 40.0, 40.0)];
        let scored = bin.find_best(Rect::new(30.0, 35.0)).unwrap();
        assert_eq!(scored.free_idx, 0);
        assert!(!scored.rotated);
    }

    #[test]
    fn test_best_short_side_fit() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), SplitPolicy::Longer);
        bin.free_rects = vec![free(0.0, 0.0, 80.0, 80.0), free(0.0, 80.0, 100.0, 21.0)];
        let scored = bin.find_best(Rect::new(20.0, 20.0)).unwrap();
        assert_eq!(scored.free_idx, 1);
        assert_eq!(scored.score, 1.0);
    }

    #[test]
    fn test_fill_exact() {
        let result = pack(
            &[instance(0, 100.0, 100.0)],
            Rect::new(100.0, 100.0),
            SplitPolicy::Area,
        );
        assert_eq!(result.placed.len(), 1);
        assert!(result.overflow.is_empty());
        assert!(result.cut_lines.is_empty());
    }

    #[test]
    fn test_pack_overflow_keeps_going() {
        let instances = [
            instance(0, 120.0, 10.0),
            instance(1, 60.0, 60.0),
            instance(2, 60.0, 60.0),
            instance(3, 40.0, 40.0),
        ];
        let result = pack(&instances, Rect::new(100.0, 100.0), SplitPolicy::Longer);
        let overflow_ids: Vec<usize> = result.overflow.iter().map(|i| i.piece_id).collect();
        assert_eq!(overflow_ids, vec![0, 2]);
        let placed_ids: Vec<usize> = result.placed.iter().map(|p| p.piece_id).collect();
        assert_eq!(placed_ids, vec![1, 3]);
        assert!(!result.placed[0].overlaps(&result.placed[1]));
    }
}
