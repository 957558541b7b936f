// Copyright (c) 2024-2025, The tinypart contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use crate::consts::*;

// The ten ways a block can be subdivided.
// The _A/_B variants are the asymmetric "T-shaped" partitions:
//   HORZ_A splits the top half in two, HORZ_B splits the bottom half in two,
//   VERT_A splits the left half in two, VERT_B splits the right half in two.
// HORZ_4/VERT_4 are four equal strips.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Partition {
  NONE = 0,
  HORZ = 1,
  VERT = 2,
  SPLIT = 3,
  HORZ_A = 4,
  HORZ_B = 5,
  VERT_A = 6,
  VERT_B = 7,
  HORZ_4 = 8,
  VERT_4 = 9
}

// All 22 block sizes allowed by AV1, in the order used by the AV1 spec
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockSize {
  BLOCK_4X4 = 0,
  BLOCK_4X8 = 1,
  BLOCK_8X4 = 2,
  BLOCK_8X8 = 3,
  BLOCK_8X16 = 4,
  BLOCK_16X8 = 5,
  BLOCK_16X16 = 6,
  BLOCK_16X32 = 7,
  BLOCK_32X16 = 8,
  BLOCK_32X32 = 9,
  BLOCK_32X64 = 10,
  BLOCK_64X32 = 11,
  BLOCK_64X64 = 12,
  BLOCK_64X128 = 13,
  BLOCK_128X64 = 14,
  BLOCK_128X128 = 15,
  BLOCK_4X16 = 16,
  BLOCK_16X4 = 17,
  BLOCK_8X32 = 18,
  BLOCK_32X8 = 19,
  BLOCK_16X64 = 20,
  BLOCK_64X16 = 21
}

impl BlockSize {
  pub fn width(self) -> usize {
    block_width_pixels[self as usize]
  }

  pub fn height(self) -> usize {
    block_height_pixels[self as usize]
  }

  // Dimensions in 4x4 luma units, the granularity at which the
  // partition tree and parameter grid operate
  pub fn width4(self) -> usize {
    self.width() >> 2
  }

  pub fn height4(self) -> usize {
    self.height() >> 2
  }

  pub fn is_square(self) -> bool {
    self.width() == self.height()
  }

  // Reverse lookup from pixel dimensions. Returns None for combinations
  // AV1 has no block size for (e.g. 4x32), which callers treat as an
  // illegal partition/size pairing.
  pub fn from_pixels(width: usize, height: usize) -> Option<BlockSize> {
    for i in 0..NUM_BLOCK_SIZES {
      if block_width_pixels[i] == width && block_height_pixels[i] == height {
        return Some(ALL_BLOCK_SIZES[i]);
      }
    }
    None
  }

  pub fn from_units4(width4: usize, height4: usize) -> Option<BlockSize> {
    BlockSize::from_pixels(width4 << 2, height4 << 2)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enums::BlockSize::*;

  #[test]
  fn dimension_tables_agree_with_names() {
    assert_eq!(BLOCK_4X4.width(), 4);
    assert_eq!(BLOCK_4X4.height(), 4);
    assert_eq!(BLOCK_64X16.width(), 64);
    assert_eq!(BLOCK_64X16.height(), 16);
    assert_eq!(BLOCK_128X128.width4(), 32);
    assert_eq!(BLOCK_128X128.height4(), 32);
    assert_eq!(BLOCK_16X8.width4(), 4);
    assert_eq!(BLOCK_16X8.height4(), 2);
  }

  #[test]
  fn squareness() {
    assert!(BLOCK_8X8.is_square());
    assert!(BLOCK_128X128.is_square());
    assert!(!BLOCK_8X16.is_square());
    assert!(!BLOCK_32X8.is_square());
  }

  #[test]
  fn from_pixels_round_trips() {
    for i in 0..NUM_BLOCK_SIZES {
      let bsize = ALL_BLOCK_SIZES[i];
      assert_eq!(BlockSize::from_pixels(bsize.width(), bsize.height()), Some(bsize));
      assert_eq!(BlockSize::from_units4(bsize.width4(), bsize.height4()), Some(bsize));
    }
  }

  #[test]
  fn from_pixels_rejects_unknown_shapes() {
    assert_eq!(BlockSize::from_pixels(4, 32), None);
    assert_eq!(BlockSize::from_pixels(128, 32), None);
    assert_eq!(BlockSize::from_pixels(0, 0), None);
  }
}
