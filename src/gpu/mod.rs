pub mod buffer;
pub mod context;
pub mod dispatch;
pub mod kernel;
pub mod platform;

pub use buffer::{Access, DeviceBuffer};
pub use context::ComputeContext;
pub use dispatch::enqueue_nd_range;
pub use kernel::{check_source, Kernel, Program, VEC_ADD_ENTRY, VEC_ADD_SOURCE};
pub use platform::{resolve, Platform, Selection};
