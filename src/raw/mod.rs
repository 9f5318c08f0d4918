mod arena;
mod handle;
mod in_order;
mod node;
mod raw_index;

pub(crate) use in_order::InOrder;
pub(crate) use raw_index::RawIndex;
