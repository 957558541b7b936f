use crate::enums::BlockSize;
use crate::enums::BlockSize::*;
use crate::enums::Partition;
use crate::enums::Partition::*;

// Pixel dimensions of each block size, indexed by BlockSize as usize.
// Order must match the BlockSize enum (AV1 spec order).
pub const block_width_pixels: [usize; 22] = [
  4, 4, 8, 8, 8, 16, 16, 16, 32, 32, 32, 64, 64, 64, 128, 128, 4, 16, 8, 32, 16, 64
];

pub const block_height_pixels: [usize; 22] = [
  4, 8, 4, 8, 16, 8, 16, 32, 16, 32, 64, 32, 64, 128, 64, 128, 16, 4, 32, 8, 64, 16
];

pub const NUM_BLOCK_SIZES: usize = 22;

pub const ALL_BLOCK_SIZES: [BlockSize; 22] = [
  BLOCK_4X4, BLOCK_4X8, BLOCK_8X4, BLOCK_8X8, BLOCK_8X16, BLOCK_16X8,
  BLOCK_16X16, BLOCK_16X32, BLOCK_32X16, BLOCK_32X32, BLOCK_32X64,
  BLOCK_64X32, BLOCK_64X64, BLOCK_64X128, BLOCK_128X64, BLOCK_128X128,
  BLOCK_4X16, BLOCK_16X4, BLOCK_8X32, BLOCK_32X8, BLOCK_16X64, BLOCK_64X16
];

pub const ALL_PARTITIONS: [Partition; 10] = [
  NONE, HORZ, VERT, SPLIT, HORZ_A, HORZ_B, VERT_A, VERT_B, HORZ_4, VERT_4
];

// Superblock sizes in 4x4 units
pub const SB_SIZE4_64: usize = 16;
pub const SB_SIZE4_128: usize = 32;
