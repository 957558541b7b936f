// Copyright (c) 2024-2025, The tinypart contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use crate::enums::{BlockSize, Partition};
use crate::params::{ParamId, ParamPool};

// Child slot layout for each partition type, one (row, col, width, height)
// tuple per populated slot, all measured in quarters of the parent block's
// extent. Multiply by the parent extent before dividing by 4, so that the
// half-size offsets stay exact for the smallest partitionable blocks.
//
// Slot semantics:
//  * HORZ: 0 top; 1 bottom
//  * VERT: 0 left; 1 right
//  * SPLIT: 0 top-left; 1 top-right; 2 bottom-left; 3 bottom-right
//  * HORZ_A: 0 top-left; 1 top-right; 2 bottom
//  * HORZ_B: 0 top; 1 bottom-left; 2 bottom-right
//  * VERT_A: 0 top-left; 1 bottom-left; 2 right
//  * VERT_B: 0 left; 1 top-right; 2 bottom-right
//  * HORZ_4: 0-3 top to bottom
//  * VERT_4: 0-3 left to right
const child_layout: [&[(usize, usize, usize, usize)]; 10] = [
  &[],                                                       // NONE
  &[(0, 0, 4, 2), (2, 0, 4, 2)],                             // HORZ
  &[(0, 0, 2, 4), (0, 2, 2, 4)],                             // VERT
  &[(0, 0, 2, 2), (0, 2, 2, 2), (2, 0, 2, 2), (2, 2, 2, 2)], // SPLIT
  &[(0, 0, 2, 2), (0, 2, 2, 2), (2, 0, 4, 2)],               // HORZ_A
  &[(0, 0, 4, 2), (2, 0, 2, 2), (2, 2, 2, 2)],               // HORZ_B
  &[(0, 0, 2, 2), (2, 0, 2, 2), (0, 2, 2, 4)],               // VERT_A
  &[(0, 0, 2, 4), (0, 2, 2, 2), (2, 2, 2, 2)],               // VERT_B
  &[(0, 0, 4, 1), (1, 0, 4, 1), (2, 0, 4, 1), (3, 0, 4, 1)], // HORZ_4
  &[(0, 0, 1, 4), (0, 1, 1, 4), (0, 2, 1, 4), (0, 3, 1, 4)]  // VERT_4
];

// Resolution state of a node. Every node starts Unresolved and makes
// exactly one forward transition, either to Leaf when its partition is
// NONE, or to Interior for any other partition.
#[derive(Clone, Copy)]
enum NodeState {
  Unresolved,
  Leaf(ParamId),
  Interior(Partition)
}

// One node of a partition tree, covering the block of size `block_size`
// whose top-left corner is at (row4, col4) in 4x4 luma units.
//
// Children of a SPLIT node are created unresolved ("hanging") and must each
// be resolved by a later set_partition() call, mirroring how the partition
// syntax is parsed recursively from the bitstream. Children of every other
// partition type are leaves and are fully resolved immediately.
pub struct ParameterTree {
  row4: usize,
  col4: usize,
  block_size: BlockSize,
  state: NodeState,
  children: [Option<Box<ParameterTree>>; 4]
}

impl ParameterTree {
  pub fn new(row4: usize, col4: usize, block_size: BlockSize) -> Self {
    Self {
      row4: row4,
      col4: col4,
      block_size: block_size,
      state: NodeState::Unresolved,
      children: [None, None, None, None]
    }
  }

  // Construct a node which is already known to be terminal, allocating its
  // parameters immediately. Equivalent to new() + set_partition(NONE).
  pub fn new_leaf(row4: usize, col4: usize, block_size: BlockSize, pool: &mut ParamPool) -> Self {
    let mut node = ParameterTree::new(row4, col4, block_size);
    node.set_partition(Partition::NONE, pool);
    return node;
  }

  // Resolve this node to the given partition type. Must be called exactly
  // once per node; a second call is a contract violation and panics.
  //
  // NONE allocates this node's parameters and makes it a leaf. SPLIT
  // creates four hanging half-size children, which the caller must resolve
  // later. Every other partition type creates its children as leaves,
  // allocating parameters for each.
  pub fn set_partition(&mut self, partition: Partition, pool: &mut ParamPool) {
    if !matches!(self.state, NodeState::Unresolved) {
      panic!("partition set twice for block at ({}, {})", self.row4, self.col4);
    }

    if partition == Partition::NONE {
      self.state = NodeState::Leaf(pool.alloc());
      return;
    }

    // Only square blocks can be recursively subdivided
    if partition == Partition::SPLIT && !self.block_size.is_square() {
      panic!("SPLIT requires a square block, got {:?} at ({}, {})",
             self.block_size, self.row4, self.col4);
    }

    let w4 = self.block_size.width4();
    let h4 = self.block_size.height4();

    for (slot, &(row_q, col_q, width_q, height_q)) in child_layout[partition as usize].iter().enumerate() {
      let child_row4 = self.row4 + h4 * row_q / 4;
      let child_col4 = self.col4 + w4 * col_q / 4;
      let child_size = BlockSize::from_units4(w4 * width_q / 4, h4 * height_q / 4)
        .unwrap_or_else(|| {
          panic!("partition {:?} of {:?} yields a size AV1 does not have", partition, self.block_size)
        });

      let child = if partition == Partition::SPLIT {
        ParameterTree::new(child_row4, child_col4, child_size)
      } else {
        ParameterTree::new_leaf(child_row4, child_col4, child_size, pool)
      };
      self.children[slot] = Some(Box::new(child));
    }

    self.state = NodeState::Interior(partition);
  }

  // Point location: descend to the leaf covering (row4, col4) and return
  // its parameters handle. Returns None if the coordinate lies outside this
  // node's block, or if the subtree covering it has not been resolved yet.
  pub fn find(&self, row4: usize, col4: usize) -> Option<ParamId> {
    if !self.contains(row4, col4) {
      return None;
    }
    match self.state {
      NodeState::Unresolved => None,
      NodeState::Leaf(id) => Some(id),
      NodeState::Interior(_) => {
        for child in self.children.iter().flatten() {
          if child.contains(row4, col4) {
            return child.find(row4, col4);
          }
        }
        None
      }
    }
  }

  fn contains(&self, row4: usize, col4: usize) -> bool {
    row4 >= self.row4 && row4 < self.row4 + self.block_size.height4() &&
    col4 >= self.col4 && col4 < self.col4 + self.block_size.width4()
  }

  pub fn row4(&self) -> usize {
    self.row4
  }

  pub fn col4(&self) -> usize {
    self.col4
  }

  pub fn block_size(&self) -> BlockSize {
    self.block_size
  }

  // None until set_partition() has been called
  pub fn partition(&self) -> Option<Partition> {
    match self.state {
      NodeState::Unresolved => None,
      NodeState::Leaf(_) => Some(Partition::NONE),
      NodeState::Interior(partition) => Some(partition)
    }
  }

  pub fn child(&self, index: usize) -> Option<&ParameterTree> {
    assert!(index < 4);
    self.children[index].as_deref()
  }

  pub fn child_mut(&mut self, index: usize) -> Option<&mut ParameterTree> {
    assert!(index < 4);
    self.children[index].as_deref_mut()
  }

  // Some iff this node is a leaf
  pub fn parameters(&self) -> Option<ParamId> {
    match self.state {
      NodeState::Leaf(id) => Some(id),
      _ => None
    }
  }

  // Visit every resolved leaf of this subtree in slot order. Used to
  // register leaves into the flattened parameter cache after a subtree has
  // been built.
  pub fn for_each_leaf(&self, f: &mut impl FnMut(&ParameterTree)) {
    match self.state {
      NodeState::Unresolved => {},
      NodeState::Leaf(_) => f(self),
      NodeState::Interior(_) => {
        for child in self.children.iter().flatten() {
          child.for_each_leaf(f);
        }
      }
    }
  }
}
