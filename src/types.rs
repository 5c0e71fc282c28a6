use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(rename = "width")]
    pub w: f64,
    #[serde(rename = "height")]
    pub h: f64,
}

impl Rect {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    /// Exact comparison: sizes that only fit up to float rounding
    /// (0.1 + 0.2 against 0.3) do not fit.
    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }

    pub fn is_square(&self) -> bool {
        self.w == self.h
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A requested panel size. `id` is its position in the caller's list.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub id: usize,
    pub rect: Rect,
    pub quantity: u32,
    pub label: Option<String>,
}

impl Piece {
    pub fn new(id: usize, rect: Rect, quantity: u32) -> Self {
        Self {
            id,
            rect,
            quantity,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The caller's label, or `Piece N` counting from 1.
    pub fn display_label(&self) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("Piece {}", self.id + 1),
        }
    }
}

/// One unit of a piece's quantity. `rect` is the unrotated size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Instance {
    pub piece_id: usize,
    pub index: u32,
    #[serde(flatten)]
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub rect: Rect,
}

/// An instance bound to a position. `rect` is the occupied size, already
/// swapped when `rotated` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedPiece {
    pub piece_id: usize,
    pub index: u32,
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub rect: Rect,
    pub rotated: bool,
}

impl PlacedPiece {
    pub fn right(&self) -> f64 {
        self.x + self.rect.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.rect.h
    }

    pub fn overlaps(&self, other: &PlacedPiece) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A straight guillotine cut, either horizontal (`y1 == y2`) or vertical
/// (`x1 == x2`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CutLine {
    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self { x1, y1: y, x2, y2: y }
    }

    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self { x1: x, y1, x2: x, y2 }
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    pub fn transposed(&self) -> Self {
        Self {
            x1: self.y1,
            y1: self.x1,
            x2: self.y2,
            y2: self.x2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackingResult {
    pub placed: Vec<PlacedPiece>,
    pub overflow: Vec<Instance>,
    pub cut_lines: Vec<CutLine>,
}

impl PackingResult {
    pub fn used_area(&self) -> f64 {
        self.placed.iter().map(|p| p.rect.area()).sum()
    }

    /// Maps a result packed on the transposed sheet back onto the original
    /// one: x and y swap everywhere and every rotation flag flips.
    pub fn transposed(self) -> Self {
        let placed = self
            .placed
            .into_iter()
            .map(|p| PlacedPiece {
                x: p.y,
                y: p.x,
                rect: p.rect.rotated(),
                rotated: !p.rotated,
                ..p
            })
            .collect();
        let cut_lines = self.cut_lines.iter().map(CutLine::transposed).collect();
        Self {
            placed,
            overflow: self.overflow,
            cut_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_fallback() {
        let piece = Piece::new(2, Rect::new(10.0, 20.0), 1);
        assert_eq!(piece.display_label(), "Piece 3");
        assert_eq!(piece.clone().with_label("  ").display_label(), "Piece 3");
        assert_eq!(piece.with_label("Door").display_label(), "Door");
    }

    #[test]
    fn test_overlap_touching_edges() {
        let a = PlacedPiece {
            piece_id: 0,
            index: 0,
            x: 0.0,
            y: 0.0,
            rect: Rect::new(50.0, 50.0),
            rotated: false,
        };
        let b = PlacedPiece { x: 50.0, ..a };
        let c = PlacedPiece { x: 49.5, y: 10.0, ..a };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_transposed_result() {
        let result = PackingResult {
            placed: vec![PlacedPiece {
                piece_id: 0,
                index: 0,
                x: 10.0,
                y: 0.0,
                rect: Rect::new(90.0, 40.0),
                rotated: false,
            }],
            overflow: vec![],
            cut_lines: vec![CutLine::vertical(100.0, 0.0, 40.0)],
        };
        let t = result.transposed();
        let p = t.placed[0];
        assert_eq!((p.x, p.y), (0.0, 10.0));
        assert_eq!(p.rect, Rect::new(40.0, 90.0));
        assert!(p.rotated);
        assert_eq!(t.cut_lines[0], CutLine::horizontal(100.0, 0.0, 40.0));
        assert!(t.cut_lines[0].is_horizontal());
    }
}
