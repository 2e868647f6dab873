use ndarray::Array2;

/// Single axis value, used for row/column positions and board dimensions.
pub type Coord = u8;

/// Area value, used for mine counts and cell counts.
pub type CellCount = u16;

/// Position or size as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a `rows × cols` board.
pub const fn area(rows: Coord, cols: Coord) -> CellCount {
    let rows = rows as CellCount;
    let cols = cols as CellCount;
    rows.saturating_mul(cols)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // dimensions come from a Coord2 so they always fit
        NeighborIter::new(center, (rows as Coord, cols as Coord))
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `offset` to `coords`, only when the result stays inside `bounds`.
fn offset_within(coords: Coord2, offset: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(offset.0)?;
    let col = coords.1.checked_add_signed(offset.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterates the up-to-8 in-bounds neighbors of a cell, never the cell itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(coords) = offset_within(self.center, offset, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}
