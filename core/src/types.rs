/// Single board dimension, used for row/column counts and positions.
pub type Dim = usize;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = usize;

/// Linear, row-major cell index: `row * cols + col`.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Dim, Dim);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0, self.1]
    }
}

pub const fn to_coords(index: CellIndex, cols: Dim) -> Coord2 {
    (index / cols, index % cols)
}

pub const fn to_index((row, col): Coord2, cols: Dim) -> CellIndex {
    row * cols + col
}

/// Iterates the linear indices of the up-to-8 cells surrounding a center cell.
///
/// Walks the 3x3 window around the center clamped to the board, row by row,
/// skipping the center. A corner yields 3 indices, a non-corner edge 5 and an
/// interior cell 8.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: CellIndex,
    cols: Dim,
    row: Dim,
    row_end: Dim,
    col: Dim,
    col_start: Dim,
    col_end: Dim,
}

impl NeighborIter {
    pub(crate) fn new(center: CellIndex, (rows, cols): Coord2) -> Self {
        let (row, col) = to_coords(center, cols);
        let col_start = col.saturating_sub(1);
        Self {
            center,
            cols,
            row: row.saturating_sub(1),
            row_end: (row + 2).min(rows),
            col: col_start,
            col_start,
            col_end: (col + 2).min(cols),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while self.row < self.row_end {
            if self.col >= self.col_end {
                self.row += 1;
                self.col = self.col_start;
                continue;
            }

            let index = to_index((self.row, self.col), self.cols);
            self.col += 1;
            if index != self.center {
                return Some(index);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(index: CellIndex, bounds: Coord2) -> Vec<CellIndex> {
        NeighborIter::new(index, bounds).collect()
    }

    #[test]
    fn index_and_coords_convert_both_ways() {
        assert_eq!(to_coords(23, 10), (2, 3));
        assert_eq!(to_index((2, 3), 10), 23);
        assert_eq!(to_coords(4, 5), (0, 4));
    }

    #[test]
    fn corner_edge_and_interior_neighbor_counts() {
        assert_eq!(neighbors(0, (10, 10)), [1, 10, 11]);
        assert_eq!(neighbors(99, (10, 10)), [88, 89, 98]);
        assert_eq!(neighbors(5, (10, 10)).len(), 5);
        assert_eq!(neighbors(55, (10, 10)), [44, 45, 46, 54, 56, 64, 65, 66]);
    }

    #[test]
    fn right_edge_does_not_wrap_into_next_row() {
        assert_eq!(neighbors(9, (10, 10)), [8, 18, 19]);
        assert_eq!(neighbors(10, (10, 10)), [0, 1, 11, 20, 21]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors(0, (1, 1)).is_empty());
    }

    #[test]
    fn single_row_board_only_looks_sideways() {
        assert_eq!(neighbors(0, (1, 4)), [1]);
        assert_eq!(neighbors(2, (1, 4)), [1, 3]);
    }
}
