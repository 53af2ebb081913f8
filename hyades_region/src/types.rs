// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the region layer: tags, cells, cluster ids, and neighborhoods.

use kurbo::Rect;

/// Opaque 32-bit value written into a region map to mark a cell's owner.
///
/// Cluster tags are packed like RGBA colors with full alpha (see
/// [`Tag::from_rgb`]), so the two reserved values, [`Tag::UNCLAIMED`] and
/// [`Tag::BORDER`], never collide with a cluster color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag(pub u32);

impl Tag {
    /// No owner.
    pub const UNCLAIMED: Self = Self(0);
    /// Transient marker for a cell pending a border check.
    pub const BORDER: Self = Self(0xFF00_0000);

    /// Pack an opaque RGB color as `r<<24 | g<<16 | b<<8 | 0xFF`.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    /// Red, green, and blue channels.
    pub const fn rgb(self) -> (u8, u8, u8) {
        let [r, g, b, _] = self.0.to_be_bytes();
        (r, g, b)
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is [`Tag::UNCLAIMED`].
    pub const fn is_unclaimed(self) -> bool {
        self.0 == Self::UNCLAIMED.0
    }

    /// Whether this is [`Tag::BORDER`].
    pub const fn is_border(self) -> bool {
        self.0 == Self::BORDER.0
    }

    /// Whether this value is reserved and cannot identify a cluster.
    pub const fn is_reserved(self) -> bool {
        self.is_unclaimed() || self.is_border()
    }
}

impl From<u32> for Tag {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifier of a cluster in a [`ClusterSet`](crate::ClusterSet).
///
/// Ids are dense and assigned in insertion order, which is also the order
/// used to break classification ties.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub(crate) u32);

impl ClusterId {
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Position of the cluster in its set.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A grid cell addressed by column and row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Column (x).
    pub col: u32,
    /// Row (y).
    pub row: u32,
}

impl Cell {
    /// Create a cell.
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Coordinates of the cell as a point in cluster space.
    pub fn coords(self) -> [f64; 2] {
        [f64::from(self.col), f64::from(self.row)]
    }

    /// Unit square covered by the cell.
    pub fn bounds(self) -> Rect {
        let x = f64::from(self.col);
        let y = f64::from(self.row);
        Rect::new(x, y, x + 1.0, y + 1.0)
    }
}

bitflags::bitflags! {
    /// Set of compass offsets used to enumerate a cell's neighbors.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// `(+1, 0)`.
        const E  = 0b0000_0001;
        /// `(-1, 0)`.
        const W  = 0b0000_0010;
        /// `(0, +1)`.
        const S  = 0b0000_0100;
        /// `(0, -1)`.
        const N  = 0b0000_1000;
        /// `(+1, +1)`.
        const SE = 0b0001_0000;
        /// `(+1, -1)`.
        const NE = 0b0010_0000;
        /// `(-1, +1)`.
        const SW = 0b0100_0000;
        /// `(-1, -1)`.
        const NW = 0b1000_0000;
        /// 4-connectivity.
        const ORTHOGONAL = Self::E.bits() | Self::W.bits() | Self::S.bits() | Self::N.bits();
        /// The four diagonals.
        const DIAGONAL = Self::SE.bits() | Self::NE.bits() | Self::SW.bits() | Self::NW.bits();
    }
}

impl Default for Directions {
    fn default() -> Self {
        Self::all()
    }
}

const OFFSETS: [(Directions, i64, i64); 8] = [
    (Directions::E, 1, 0),
    (Directions::W, -1, 0),
    (Directions::S, 0, 1),
    (Directions::N, 0, -1),
    (Directions::SE, 1, 1),
    (Directions::NE, 1, -1),
    (Directions::SW, -1, 1),
    (Directions::NW, -1, -1),
];

/// Width and height of a grid in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridSize {
    /// Create a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells.
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `cell` lies inside the grid.
    pub const fn contains(self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// In-bounds neighbors of `cell` along `dirs`, in E, W, S, N, SE, NE, SW, NW order.
    ///
    /// Off-grid offsets are skipped silently.
    pub fn neighbors(self, cell: Cell, dirs: Directions) -> impl Iterator<Item = Cell> {
        OFFSETS
            .into_iter()
            .filter(move |(d, _, _)| dirs.contains(*d))
            .filter_map(move |(_, dx, dy)| {
                let col = i64::from(cell.col) + dx;
                let row = i64::from(cell.row) + dy;
                let n = Cell::new(u32::try_from(col).ok()?, u32::try_from(row).ok()?);
                self.contains(n).then_some(n)
            })
    }

    /// Cell nearest to a 2D coordinate, or `None` when it falls outside the grid.
    ///
    /// Coordinates are rounded half up; anything that is not two finite values
    /// is outside.
    pub fn cell_at(self, coords: &[f64]) -> Option<Cell> {
        let &[x, y] = coords else {
            return None;
        };
        Some(Cell::new(
            round_axis(x, self.width)?,
            round_axis(y, self.height)?,
        ))
    }

    /// Rectangle covering the whole grid.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

fn round_axis(v: f64, len: u32) -> Option<u32> {
    let shifted = v + 0.5;
    if !(shifted >= 0.0 && shifted < f64::from(len)) {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range checked above: 0 <= shifted < len <= u32::MAX."
    )]
    let v = shifted as u32;
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn tag_encoding() {
        let t = Tag::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(t.get(), 0x1234_56FF);
        assert_eq!(t.rgb(), (0x12, 0x34, 0x56));
        assert!(!t.is_reserved());
        assert!(Tag::UNCLAIMED.is_unclaimed());
        assert!(Tag::BORDER.is_border());
        assert_ne!(Tag::from_rgb(255, 0, 0), Tag::BORDER);
        assert_ne!(Tag::from_rgb(0, 0, 0), Tag::UNCLAIMED);
    }

    #[test]
    fn corner_has_three_neighbors() {
        let size = GridSize::new(5, 5);
        let n: Vec<_> = size.neighbors(Cell::new(0, 0), Directions::all()).collect();
        assert_eq!(n, [Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)]);
        let n: Vec<_> = size.neighbors(Cell::new(4, 4), Directions::ORTHOGONAL).collect();
        assert_eq!(n, [Cell::new(3, 4), Cell::new(4, 3)]);
    }

    #[test]
    fn interior_cell_order() {
        let size = GridSize::new(3, 3);
        let n: Vec<_> = size.neighbors(Cell::new(1, 1), Directions::default()).collect();
        assert_eq!(
            n,
            [
                Cell::new(2, 1),
                Cell::new(0, 1),
                Cell::new(1, 2),
                Cell::new(1, 0),
                Cell::new(2, 2),
                Cell::new(2, 0),
                Cell::new(0, 2),
                Cell::new(0, 0),
            ]
        );
        assert_eq!(size.neighbors(Cell::new(1, 1), Directions::DIAGONAL).count(), 4);
    }

    #[test]
    fn one_by_one_grid_has_no_neighbors() {
        let size = GridSize::new(1, 1);
        assert_eq!(size.neighbors(Cell::new(0, 0), Directions::all()).count(), 0);
    }

    #[test]
    fn cell_at_rounds_and_clips() {
        let size = GridSize::new(4, 3);
        assert_eq!(size.cell_at(&[1.4, 1.6]), Some(Cell::new(1, 2)));
        assert_eq!(size.cell_at(&[-0.4, 0.0]), Some(Cell::new(0, 0)));
        assert_eq!(size.cell_at(&[-0.6, 0.0]), None);
        assert_eq!(size.cell_at(&[3.4, 2.4]), Some(Cell::new(3, 2)));
        assert_eq!(size.cell_at(&[3.5, 0.0]), None);
        assert_eq!(size.cell_at(&[f64::NAN, 0.0]), None);
        assert_eq!(size.cell_at(&[1.0]), None);
    }

    #[test]
    fn bounds() {
        assert_eq!(Cell::new(2, 3).bounds(), Rect::new(2.0, 3.0, 3.0, 4.0));
        assert_eq!(GridSize::new(4, 3).bounds(), Rect::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(GridSize::new(4, 3).area(), 12);
    }
}
