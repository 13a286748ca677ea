//! Immutable compressed-sparse-row matrix
//!
//! Stores only the non-zero cells of a matrix in three arrays:
//! - `indptr`: row `i` occupies positions `indptr[i]..indptr[i + 1]`
//! - `indices`: column of each stored cell
//! - `data`: value of each stored cell
//!
//! Columns within a row are kept in storage order and are not required to
//! be sorted. When every row is strictly sorted, cell lookup switches from a
//! linear scan to a binary search.

use crate::error::GraphError;
use std::iter::FusedIterator;

/// Read-only CSR container over cell values of type `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableCsrMatrix<E> {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<E>,
    n_cols: usize,

    /// Every row has strictly increasing columns
    sorted_rows: bool,
}

impl<E> ImmutableCsrMatrix<E> {
    /// Create a matrix from its CSR arrays, validating their structure.
    pub fn new(
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<E>,
        n_cols: usize,
    ) -> Result<Self, GraphError> {
        if indptr.first() != Some(&0) {
            return Err(GraphError::malformed("indptr must start with 0"));
        }
        if let Some(pos) = indptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::malformed(format!(
                "indptr decreases at row {}: {} > {}",
                pos,
                indptr[pos],
                indptr[pos + 1]
            )));
        }
        if indices.len() != data.len() {
            return Err(GraphError::malformed(format!(
                "indices length {} differs from data length {}",
                indices.len(),
                data.len()
            )));
        }
        let last = indptr.last().copied().unwrap_or_default();
        if last != indices.len() {
            return Err(GraphError::malformed(format!(
                "indptr ends at {} but {} cells are stored",
                last,
                indices.len()
            )));
        }
        if let Some(col) = indices.iter().find(|&&c| c >= n_cols) {
            return Err(GraphError::malformed(format!(
                "column {} out of range [0, {})",
                col, n_cols
            )));
        }

        let sorted_rows = indptr
            .windows(2)
            .all(|w| indices[w[0]..w[1]].windows(2).all(|c| c[0] < c[1]));

        Ok(Self {
            indptr,
            indices,
            data,
            n_cols,
            sorted_rows,
        })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored cells
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &[E] {
        &self.data
    }

    fn row_bounds(&self, row: usize) -> Result<(usize, usize), GraphError> {
        if row >= self.n_rows() {
            return Err(GraphError::RowOutOfRange {
                row,
                rows: self.n_rows(),
            });
        }
        Ok((self.indptr[row], self.indptr[row + 1]))
    }

    /// Number of stored cells in `row`.
    pub fn row_nnz(&self, row: usize) -> Result<usize, GraphError> {
        let (start, end) = self.row_bounds(row)?;
        Ok(end - start)
    }

    /// Column indices and values stored for `row`.
    pub fn row(&self, row: usize) -> Result<(&[usize], &[E]), GraphError> {
        let (start, end) = self.row_bounds(row)?;
        Ok((&self.indices[start..end], &self.data[start..end]))
    }

    /// Whether every row stores its columns in strictly increasing order.
    pub fn has_sorted_rows(&self) -> bool {
        self.sorted_rows
    }

    /// Value stored at `(row, col)`, if any.
    ///
    /// O(log row_nnz) when rows are sorted, O(row_nnz) otherwise.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&E>, GraphError> {
        let (cols, values) = self.row(row)?;
        let found = if self.sorted_rows {
            cols.binary_search(&col).ok()
        } else {
            cols.iter().position(|&c| c == col)
        };
        Ok(found.map(|k| &values[k]))
    }

    /// Lazily iterate the columns of `row` whose value satisfies `predicate`.
    ///
    /// Columns come out in storage order. The iterator borrows the matrix and
    /// holds its own scan position, so each consumer needs its own instance.
    pub fn col_indices_of_val<P>(
        &self,
        row: usize,
        predicate: P,
    ) -> Result<ColIndices<'_, E, P>, GraphError>
    where
        P: FnMut(&E) -> bool,
    {
        let (start, end) = self.row_bounds(row)?;
        Ok(ColIndices {
            indices: &self.indices[start..end],
            data: &self.data[start..end],
            cursor: 0,
            predicate,
        })
    }
}

/// Iterator returned by [`ImmutableCsrMatrix::col_indices_of_val`].
pub struct ColIndices<'a, E, P> {
    indices: &'a [usize],
    data: &'a [E],
    cursor: usize,
    predicate: P,
}

impl<E, P> Iterator for ColIndices<'_, E, P>
where
    P: FnMut(&E) -> bool,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.cursor < self.indices.len() {
            let k = self.cursor;
            self.cursor += 1;
            if (self.predicate)(&self.data[k]) {
                return Some(self.indices[k]);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.indices.len() - self.cursor))
    }
}

impl<E, P> FusedIterator for ColIndices<'_, E, P> where P: FnMut(&E) -> bool {}

#[cfg(test)]
mod tests {
    use super::*;

    //   0 1 2
    // 0 [1 . 2]
    // 1 [. . .]
    // 2 [. 3 4]
    fn sample() -> ImmutableCsrMatrix<u8> {
        ImmutableCsrMatrix::new(vec![0, 2, 2, 4], vec![2, 0, 1, 2], vec![2, 1, 3, 4], 3).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let m = sample();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.n_cols(), 3);
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.row_nnz(1), Ok(0));
    }

    #[test]
    fn test_columns_in_storage_order() {
        let m = sample();
        let cols: Vec<usize> = m.col_indices_of_val(0, |_| true).unwrap().collect();
        assert_eq!(cols, vec![2, 0]);
    }

    #[test]
    fn test_predicate_filters_values() {
        let m = sample();
        let cols: Vec<usize> = m.col_indices_of_val(2, |v| *v % 2 == 0).unwrap().collect();
        assert_eq!(cols, vec![2]);
    }

    #[test]
    fn test_empty_row() {
        let m = sample();
        let mut it = m.col_indices_of_val(1, |_| true).unwrap();
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let m = sample();
        let first: Vec<usize> = m.col_indices_of_val(2, |_| true).unwrap().collect();
        let second: Vec<usize> = m.col_indices_of_val(2, |_| true).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_out_of_range() {
        let m = sample();
        assert_eq!(
            m.col_indices_of_val(3, |_| true).err(),
            Some(GraphError::RowOutOfRange { row: 3, rows: 3 })
        );
        assert!(m.row(7).is_err());
    }

    #[test]
    fn test_get_cell() {
        let m = sample();
        assert_eq!(m.get(0, 0), Ok(Some(&1)));
        assert_eq!(m.get(2, 1), Ok(Some(&3)));
        assert_eq!(m.get(1, 1), Ok(None));
    }

    #[test]
    fn test_get_cell_in_sorted_rows() {
        //   0 1 2 3
        // 0 [. 5 . 6]
        // 1 [7 . 8 9]
        let m = ImmutableCsrMatrix::new(vec![0, 2, 5], vec![1, 3, 0, 2, 3], vec![5u8, 6, 7, 8, 9], 4)
            .unwrap();
        assert!(m.has_sorted_rows());
        assert!(!sample().has_sorted_rows());

        assert_eq!(m.get(0, 3), Ok(Some(&6)));
        assert_eq!(m.get(1, 0), Ok(Some(&7)));
        assert_eq!(m.get(1, 3), Ok(Some(&9)));
        assert_eq!(m.get(0, 2), Ok(None));
        assert_eq!(m.get(1, 1), Ok(None));
    }

    #[test]
    fn test_duplicate_columns_are_not_sorted() {
        let m = ImmutableCsrMatrix::new(vec![0, 2], vec![1, 1], vec![1u8, 2], 2).unwrap();
        assert!(!m.has_sorted_rows());
        assert_eq!(m.get(0, 1), Ok(Some(&1)));
    }

    #[test]
    fn test_rejects_malformed_arrays() {
        let cases: Vec<(Vec<usize>, Vec<usize>, Vec<u8>)> = vec![
            (vec![], vec![], vec![]),
            (vec![1, 1], vec![0], vec![1]),
            (vec![0, 2, 1], vec![0, 1], vec![1, 1]),
            (vec![0, 1], vec![0], vec![]),
            (vec![0, 1], vec![0, 1], vec![1, 1]),
            (vec![0, 1], vec![5], vec![1]),
        ];
        for (indptr, indices, data) in cases {
            assert!(matches!(
                ImmutableCsrMatrix::new(indptr, indices, data, 2),
                Err(GraphError::MalformedMatrix(_))
            ));
        }
    }

    #[test]
    fn test_zero_rows() {
        let m: ImmutableCsrMatrix<u8> = ImmutableCsrMatrix::new(vec![0], vec![], vec![], 0).unwrap();
        assert_eq!(m.n_rows(), 0);
        assert!(m.row(0).is_err());
    }
}
