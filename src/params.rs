use std::num::NonZeroU32;

// Per-block decode parameters. The partition tree and grid allocate and
// track these but never look inside; the fields are filled in by the mode
// and motion parsing stages.
#[derive(Clone, Default, Debug)]
pub struct BlockParameters {
  pub skip: bool,
  pub segment_id: u8,
  pub is_inter: bool,
  pub y_mode: u8,
  pub uv_mode: u8,
  pub qindex_delta: i8
}

// Stable handle to a BlockParameters entry in a ParamPool.
// Stored as index + 1 so that Option<ParamId> is 4 bytes with the all-zeroes
// bit pattern meaning None, which lets the parameter cache be allocated as a
// zeroed Array2D.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct ParamId(NonZeroU32);

// Safety: ParamId is repr(transparent) over NonZeroU32, so Option<ParamId>
// has the same niche and the zero pattern is None
unsafe impl bytemuck::ZeroableInOption for ParamId {}

impl ParamId {
  fn from_index(index: usize) -> ParamId {
    ParamId(NonZeroU32::new((index as u32) + 1).unwrap())
  }

  fn index(self) -> usize {
    (self.0.get() - 1) as usize
  }
}

// Pool of all BlockParameters for one frame (or one independently decoded
// tile region). Leaves of the partition trees hold ParamIds into this pool
// rather than owning the parameters directly, so the flattened cache can
// alias them without any risk of dangling on teardown - the pool, the trees
// and the cache are all dropped together with the grid.
pub struct ParamPool {
  params: Vec<BlockParameters>
}

impl ParamPool {
  pub fn new() -> Self {
    Self {
      params: Vec::new()
    }
  }

  pub fn len(&self) -> usize {
    self.params.len()
  }

  // Allocate a fresh, default-initialized BlockParameters entry
  pub fn alloc(&mut self) -> ParamId {
    let id = ParamId::from_index(self.params.len());
    self.params.push(BlockParameters::default());
    return id;
  }

  pub fn get(&self, id: ParamId) -> &BlockParameters {
    &self.params[id.index()]
  }

  pub fn get_mut(&mut self, id: ParamId) -> &mut BlockParameters {
    &mut self.params[id.index()]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alloc_returns_distinct_ids() {
    let mut pool = ParamPool::new();
    let a = pool.alloc();
    let b = pool.alloc();
    assert_ne!(a, b);
    assert_eq!(pool.len(), 2);
  }

  #[test]
  fn get_mut_writes_are_visible() {
    let mut pool = ParamPool::new();
    let id = pool.alloc();
    pool.get_mut(id).segment_id = 5;
    pool.get_mut(id).skip = true;
    assert_eq!(pool.get(id).segment_id, 5);
    assert!(pool.get(id).skip);
  }

  #[test]
  fn option_param_id_zero_pattern_is_none() {
    // The cache relies on zeroed allocation producing None in every cell
    let cache = crate::array2d::Array2D::<Option<ParamId>>::zeroed(2, 2);
    assert_eq!(cache[0][0], None);
    assert_eq!(cache[1][1], None);
  }
}
