// Copyright (c) 2024-2025, The tinypart contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

#![allow(dead_code)]

// Disable name styling checks, so that we can name things in line with the AV1 spec
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

mod array2d;
mod consts;
mod enums;
mod param_grid;
mod param_tree;
mod params;

use std::collections::HashMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::exit;

use byteorder::{BigEndian, WriteBytesExt};
use clap::Parser;

use crate::enums::Partition::*;
use crate::param_grid::ParamGrid;
use crate::param_tree::ParameterTree;
use crate::params::{ParamId, ParamPool};

#[derive(Parser)]
#[command(override_usage = "tinypart --width <WIDTH> --height <HEIGHT> [--pattern <PATTERN>] [-o <OUTPUT>]")]
struct CommandlineArgs {
  /// Frame width in pixels
  #[arg(long)]
  width: usize,
  /// Frame height in pixels
  #[arg(long)]
  height: usize,
  /// Use 128x128 superblocks instead of 64x64
  #[arg(long)]
  sb128: bool,
  /// Partition pattern to apply to each superblock: none, split, or mixed
  #[arg(long, default_value = "mixed")]
  pattern: String,
  /// Block size in pixels that the split pattern divides down to
  #[arg(long, default_value_t = 16)]
  target: usize,
  /// Optional output file for a binary dump of the parameter cache
  #[arg(short, long)]
  output: Option<PathBuf>,
}

// Resolve a whole subtree by quad-splitting every square block larger than
// `target4` units and making everything else a leaf
fn resolve_split(node: &mut ParameterTree, pool: &mut ParamPool, target4: usize) {
  if node.block_size().width4() <= target4 || !node.block_size().is_square() {
    node.set_partition(NONE, pool);
    return;
  }
  node.set_partition(SPLIT, pool);
  for slot in 0..4 {
    resolve_split(node.child_mut(slot).unwrap(), pool, target4);
  }
}

// Resolve a superblock with a shape mix chosen by its index, so that a frame
// of a few superblocks exercises all ten partition types
fn resolve_mixed(root: &mut ParameterTree, pool: &mut ParamPool, sb_index: usize) {
  match sb_index % 3 {
    0 => {
      root.set_partition(NONE, pool);
    },
    1 => {
      root.set_partition(SPLIT, pool);
      let shapes = [HORZ_A, HORZ_B, VERT_A, VERT_B];
      for slot in 0..4 {
        root.child_mut(slot).unwrap().set_partition(shapes[slot], pool);
      }
    },
    _ => {
      root.set_partition(SPLIT, pool);
      let shapes = [HORZ, VERT, HORZ_4, VERT_4];
      for slot in 0..4 {
        root.child_mut(slot).unwrap().set_partition(shapes[slot], pool);
      }
    }
  }
}

// Print the cache as one character per 4x4 unit, cycling through
// alphanumerics per distinct parameter object. '.' marks unfilled cells.
fn print_map(grid: &ParamGrid) {
  const chars: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
  let mut ordinals = HashMap::<ParamId, usize>::new();

  for row4 in 0..grid.rows4() {
    let mut line = String::with_capacity(grid.cols4());
    for col4 in 0..grid.cols4() {
      line.push(match grid.find(row4, col4) {
        None => '.',
        Some(id) => {
          let next = ordinals.len();
          let ordinal = *ordinals.entry(id).or_insert(next);
          chars[ordinal % chars.len()] as char
        }
      });
    }
    println!("{}", line);
  }
}

// Dump the cache as a simple binary map: "PMAP" magic, row and column
// counts, then one value per cell, all big-endian u32. Cells hold the
// parameter object's first-seen ordinal + 1, with 0 meaning unfilled.
fn write_map<W: Write>(w: &mut W, grid: &ParamGrid) -> Result<(), std::io::Error> {
  let mut ordinals = HashMap::<ParamId, u32>::new();

  w.write_all(b"PMAP")?;
  w.write_u32::<BigEndian>(grid.rows4() as u32)?;
  w.write_u32::<BigEndian>(grid.cols4() as u32)?;
  for row4 in 0..grid.rows4() {
    for col4 in 0..grid.cols4() {
      let value = match grid.find(row4, col4) {
        None => 0,
        Some(id) => {
          let next = ordinals.len() as u32 + 1;
          *ordinals.entry(id).or_insert(next)
        }
      };
      w.write_u32::<BigEndian>(value)?;
    }
  }
  Ok(())
}

fn main() {
  let args = CommandlineArgs::parse();

  if args.width == 0 || args.height == 0 {
    println!("Error: frame dimensions must be nonzero");
    exit(2);
  }

  match args.pattern.as_str() {
    "none" | "split" | "mixed" => {},
    _ => {
      println!("Error: pattern must be one of none, split, mixed");
      exit(2);
    }
  }

  let rows4 = args.height.div_ceil(4);
  let cols4 = args.width.div_ceil(4);
  let target4 = (args.target / 4).max(1);

  let mut grid = ParamGrid::new(rows4, cols4, args.sb128);

  for sb_row in 0..grid.superblock_rows() {
    for sb_col in 0..grid.superblock_cols() {
      let sb_index = sb_row * grid.superblock_cols() + sb_col;
      let (root, pool) = grid.tree_mut(sb_row, sb_col);
      match args.pattern.as_str() {
        "none" => root.set_partition(NONE, pool),
        "split" => resolve_split(root, pool, target4),
        "mixed" => resolve_mixed(root, pool, sb_index),
        _ => unreachable!()
      }
      grid.fill_cache_for_superblock(sb_row, sb_col);
    }
  }

  let filled = (0..rows4).flat_map(|r| (0..cols4).map(move |c| (r, c)))
    .filter(|&(r, c)| grid.find(r, c).is_some())
    .count();

  println!("{}x{} pixels: {}x{} units, {}x{} superblocks of {} units",
           args.width, args.height, rows4, cols4,
           grid.superblock_rows(), grid.superblock_cols(), grid.superblock_size4());
  println!("{} blocks, {}/{} cells filled", grid.num_parameters(), filled, rows4 * cols4);

  // Keep the console output readable for large frames
  if cols4 <= 128 && rows4 <= 128 {
    print_map(&grid);
  }

  if let Some(output_path) = args.output {
    let mut map_file = File::create(output_path).unwrap();
    write_map(&mut map_file, &grid).unwrap();
  }
}
