use bytemuck::Zeroable;
use bytemuck::allocation::zeroed_slice_box;

use std::ops::{Index, IndexMut};

// Two-dimensional array type
pub struct Array2D<T> {
  rows: usize,
  cols: usize,
  stride: usize,
  data: Box<[T]>,
}

impl<T> Array2D<T> {
  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }

  // Build an array by evaluating `f` at every (row, col) position.
  // Unlike zeroed(), this works for element types which have no all-zeroes
  // representation, such as the partition tree nodes.
  pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, mut f: F) -> Self {
    let num_elements = rows.checked_mul(cols).unwrap();
    let mut data = Vec::with_capacity(num_elements);
    for i in 0..rows {
      for j in 0..cols {
        data.push(f(i, j));
      }
    }

    Self {
      rows: rows,
      cols: cols,
      stride: cols,
      data: data.into_boxed_slice()
    }
  }

  // Bounds-checked element access, for lookups which are allowed to fall
  // off the edge of the array and expect "no data" rather than a panic
  pub fn get(&self, row: usize, col: usize) -> Option<&T> {
    if row >= self.rows || col >= self.cols {
      return None;
    }
    Some(&self.data[row * self.stride + col])
  }
}

impl<T: Clone> Array2D<T> {
  // Fill a region of a given size with (cloned) copies of `value`
  pub fn fill_region(&mut self, row_start: usize, col_start: usize, rows: usize, cols: usize, value: &T) {
    let row_end = row_start.checked_add(rows).unwrap();
    let col_end = col_start.checked_add(cols).unwrap();

    if row_end > self.rows {
      panic!("Array2D row indices out of bounds (index {}..{} vs. size {})", row_start, row_end, self.rows);
    }
    if col_end > self.cols {
      panic!("Array2D column indices out of bounds (index {}..{} vs. size {})", col_start, col_end, self.cols);
    }

    for row in row_start .. row_end {
      for col in col_start .. col_end {
        // Due to the above checks, this calculation should never overflow
        self[row][col] = value.clone();
      }
    }
  }
}

impl<T: Zeroable> Array2D<T> {
  pub fn zeroed(rows: usize, cols: usize) -> Self {
    let stride = cols;
    let num_elements = rows.checked_mul(stride).unwrap();
    let data = zeroed_slice_box(num_elements);

    Self {
      rows: rows,
      cols: cols,
      stride: stride,
      data: data
    }
  }
}

// Allow indexing by array[row][col]
// This is done by having array[row] return a normal slice which
// references the entire row in question. Then a normal slice index
// can pick out the desired element
impl<T> Index<usize> for Array2D<T> {
  type Output = [T];
  fn index(&self, index: usize) -> &[T] {
    if index >= self.rows {
      panic!("Array2D row index out of bounds (index {} vs. size {})", index, self.rows);
    }
    // Due to the above check, these calculations should never overflow
    let start_index = index * self.stride;
    let end_index = start_index + self.cols;
    &self.data[start_index .. end_index]
  }
}

impl<T> IndexMut<usize> for Array2D<T> {
  fn index_mut(&mut self, index: usize) -> &mut [T] {
    if index >= self.rows {
      panic!("Array2D row index out of bounds (index {} vs. size {})", index, self.rows);
    }
    // Due to the above check, these calculations should never overflow
    let start_index = index * self.stride;
    let end_index = start_index + self.cols;
    &mut self.data[start_index .. end_index]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zeroed_is_all_zero() {
    let a = Array2D::<u32>::zeroed(3, 5);
    assert_eq!(a.rows(), 3);
    assert_eq!(a.cols(), 5);
    for row in 0..3 {
      for col in 0..5 {
        assert_eq!(a[row][col], 0);
      }
    }
  }

  #[test]
  fn from_fn_evaluates_every_cell() {
    let a = Array2D::from_fn(4, 3, |i, j| i * 10 + j);
    assert_eq!(a[0][0], 0);
    assert_eq!(a[3][2], 32);
    assert_eq!(a[2][1], 21);
  }

  #[test]
  fn get_returns_none_out_of_bounds() {
    let a = Array2D::<u8>::zeroed(2, 2);
    assert_eq!(a.get(1, 1), Some(&0));
    assert_eq!(a.get(2, 0), None);
    assert_eq!(a.get(0, 2), None);
  }

  #[test]
  fn fill_region_writes_exactly_the_region() {
    let mut a = Array2D::<u8>::zeroed(4, 4);
    a.fill_region(1, 1, 2, 2, &7);
    for row in 0..4 {
      for col in 0..4 {
        let inside = (1..3).contains(&row) && (1..3).contains(&col);
        assert_eq!(a[row][col], if inside { 7 } else { 0 });
      }
    }
  }

  #[test]
  #[should_panic]
  fn fill_region_rejects_out_of_bounds() {
    let mut a = Array2D::<u8>::zeroed(4, 4);
    a.fill_region(2, 0, 3, 1, &1);
  }
}
