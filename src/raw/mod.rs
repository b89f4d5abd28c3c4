mod arena;
mod handle;
mod node;
mod raw_osrb_tree;
mod size;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use node::Direction;
pub(crate) use raw_osrb_tree::RawOSRBTree;
