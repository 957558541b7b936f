use crate::array2d::Array2D;
use crate::consts::*;
use crate::enums::BlockSize;
use crate::param_tree::ParameterTree;
use crate::params::{BlockParameters, ParamId, ParamPool};

// Per-frame holder for the partition tree forest and the flattened
// parameter lookup cache.
//
// One unresolved ParameterTree root is created per superblock position at
// construction time. While parsing, the caller resolves each root top-down
// and registers every leaf's rectangle into the cache with fill_cache().
// Later decode stages then use find() for O(1) lookups instead of walking
// a tree for every query.
//
// Dropping the grid releases the forest, the cache and the parameter pool
// together, so cache entries can never outlive the parameters they name.
pub struct ParamGrid {
  rows4: usize,
  cols4: usize,
  sb_size4: usize,
  trees: Array2D<ParameterTree>,
  cache: Array2D<Option<ParamId>>,
  pool: ParamPool
}

impl ParamGrid {
  pub fn new(rows4: usize, cols4: usize, use_128x128_superblock: bool) -> Self {
    assert!(rows4 > 0 && cols4 > 0);

    let (sb_size4, sb_block_size) = if use_128x128_superblock {
      (SB_SIZE4_128, BlockSize::BLOCK_128X128)
    } else {
      (SB_SIZE4_64, BlockSize::BLOCK_64X64)
    };

    let sb_rows = rows4.div_ceil(sb_size4);
    let sb_cols = cols4.div_ceil(sb_size4);

    Self {
      rows4: rows4,
      cols4: cols4,
      sb_size4: sb_size4,
      trees: Array2D::from_fn(sb_rows, sb_cols, |sb_row, sb_col| {
        ParameterTree::new(sb_row * sb_size4, sb_col * sb_size4, sb_block_size)
      }),
      cache: Array2D::zeroed(rows4, cols4),
      pool: ParamPool::new()
    }
  }

  pub fn rows4(&self) -> usize {
    self.rows4
  }

  pub fn cols4(&self) -> usize {
    self.cols4
  }

  pub fn superblock_size4(&self) -> usize {
    self.sb_size4
  }

  pub fn superblock_rows(&self) -> usize {
    self.trees.rows()
  }

  pub fn superblock_cols(&self) -> usize {
    self.trees.cols()
  }

  // Number of parameter objects allocated so far, i.e. the number of
  // resolved leaves across the whole forest
  pub fn num_parameters(&self) -> usize {
    self.pool.len()
  }

  // Root of the partition tree for the superblock at (sb_row, sb_col).
  // Out-of-range positions are a caller bug and panic via Array2D.
  pub fn tree(&self, sb_row: usize, sb_col: usize) -> &ParameterTree {
    &self.trees[sb_row][sb_col]
  }

  // Mutable root access for resolving partitions. The parameter pool is
  // handed out alongside the tree because resolving a leaf allocates from
  // it; borrowing them separately from the grid is not possible.
  pub fn tree_mut(&mut self, sb_row: usize, sb_col: usize) -> (&mut ParameterTree, &mut ParamPool) {
    (&mut self.trees[sb_row][sb_col], &mut self.pool)
  }

  // Record that the block of size `block_size` at (row4, col4) is covered
  // by the parameters `id`, by writing `id` into every cache cell of the
  // block's rectangle. The rectangle is clipped to the frame's extent, so
  // blocks of a superblock straddling the right or bottom frame edge only
  // write their in-bounds portion.
  pub fn fill_cache(&mut self, row4: usize, col4: usize, block_size: BlockSize, id: ParamId) {
    assert!(row4 < self.rows4 && col4 < self.cols4,
            "fill_cache start ({}, {}) outside {}x{} grid", row4, col4, self.rows4, self.cols4);

    let rows = block_size.height4().min(self.rows4 - row4);
    let cols = block_size.width4().min(self.cols4 - col4);
    self.cache.fill_region(row4, col4, rows, cols, &Some(id));
  }

  // O(1) parameter lookup at (row4, col4). Returns None if the cell was
  // never filled or lies outside the grid.
  pub fn find(&self, row4: usize, col4: usize) -> Option<ParamId> {
    self.cache.get(row4, col4).copied().flatten()
  }

  pub fn get(&self, id: ParamId) -> &BlockParameters {
    self.pool.get(id)
  }

  pub fn get_mut(&mut self, id: ParamId) -> &mut BlockParameters {
    self.pool.get_mut(id)
  }

  // Walk the given superblock's tree and register every resolved leaf into
  // the cache. Callers which interleave parsing and cache fills can instead
  // call fill_cache() per leaf as it is resolved.
  pub fn fill_cache_for_superblock(&mut self, sb_row: usize, sb_col: usize) {
    let mut leaves = Vec::new();
    self.tree(sb_row, sb_col).for_each_leaf(&mut |leaf| {
      leaves.push((leaf.row4(), leaf.col4(), leaf.block_size(), leaf.parameters().unwrap()));
    });
    for (row4, col4, block_size, id) in leaves {
      // A leaf may lie entirely outside the frame when its superblock
      // straddles the edge; skip those rather than assert
      if row4 < self.rows4 && col4 < self.cols4 {
        self.fill_cache(row4, col4, block_size, id);
      }
    }
  }
}
