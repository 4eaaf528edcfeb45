//! Row-major layout helpers for paired sample matrices.
//!
//! ## Purpose
//!
//! Samples are passed around as flat row-major slices plus a column count.
//! This module provides the handful of reshaping operations the estimator
//! needs: counting rows, joining two matrices column-wise into the joint
//! space, and extracting row subsets for bootstrap replicates.
//!
//! ## Invariants
//!
//! * Row order is preserved by every operation.
//! * `data.len()` is always a multiple of the column count.

/// Number of rows in a flat row-major matrix.
#[inline]
pub fn row_count<T>(data: &[T], columns: usize) -> usize {
    if columns == 0 {
        0
    } else {
        data.len() / columns
    }
}

/// Join two row-major matrices side by side.
///
/// Row `i` of the result is row `i` of `a` followed by row `i` of `b`.
pub fn concat_columns<T: Copy>(a: &[T], a_cols: usize, b: &[T], b_cols: usize) -> Vec<T> {
    let n = row_count(a, a_cols);
    debug_assert_eq!(n, row_count(b, b_cols));

    let width = a_cols + b_cols;
    let mut joint = Vec::with_capacity(n * width);
    for (row_a, row_b) in a.chunks_exact(a_cols).zip(b.chunks_exact(b_cols)) {
        joint.extend_from_slice(row_a);
        joint.extend_from_slice(row_b);
    }
    joint
}

/// Copy the given rows of a row-major matrix into scratch storage.
pub fn select_rows_into<T: Copy>(data: &[T], columns: usize, rows: &[usize], out: &mut Vec<T>) {
    out.clear();
    out.reserve(rows.len() * columns);
    for &r in rows {
        let start = r * columns;
        out.extend_from_slice(&data[start..start + columns]);
    }
}

/// Copy the given rows of a row-major matrix into a new vector.
pub fn select_rows<T: Copy>(data: &[T], columns: usize, rows: &[usize]) -> Vec<T> {
    let mut out = Vec::with_capacity(rows.len() * columns);
    select_rows_into(data, columns, rows, &mut out);
    out
}
