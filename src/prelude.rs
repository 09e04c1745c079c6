pub use crate::config::{Config, ConfigBuilder, INPUT_A, INPUT_B, SIZE};
pub use crate::error::{Error, Result};
pub use crate::gpu::{Access, ComputeContext, DeviceBuffer, Kernel, Program};
pub use crate::report::Report;
pub use crate::session::{run, Session};
pub use crate::telemetry::{Phase, Timeline};
