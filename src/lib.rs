//! gpu-vecadd - element-wise integer vector addition on a GPU
//!
//! A small, linear compute procedure built on `wgpu`: pick the first
//! platform (backend) and the first device (adapter) under it, compile a
//! kernel, copy two `i32` arrays to the device, run one invocation per
//! element, and copy the sum back.
//!
//! # Quick Start
//!
//! ```no_run
//! use gpu_vecadd::prelude::*;
//!
//! let session = Session::open(Config::default()).unwrap();
//! println!("Using platform: {}", session.platform_name());
//! println!("Using device: {}", session.device_name());
//!
//! let report = session.run().unwrap();
//! assert_eq!(report.output(), vec![4, 5, 6, 7, 8, 9, 11, 12]);
//! ```
//!
//! Every failure is fatal to a run and surfaces as an [`Error`]; the binary
//! prints it and exits with [`Error::exit_code`].

#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod gpu;
pub mod prelude;
pub mod report;
pub mod session;
pub mod telemetry;

pub use config::{Config, ConfigBuilder, INPUT_A, INPUT_B, SIZE};
pub use error::{Error, Result};
pub use report::Report;
pub use session::{run, Session};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_platforms_before_any_device_work() {
        let config = Config::builder()
            .backends(wgpu::Backends::empty())
            .build()
            .unwrap();

        let err = Session::open(config).unwrap_err();
        assert!(matches!(err, Error::NoPlatforms));
        assert_eq!(err.to_string(), "No platforms available!");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_resolution() {
        let mut config = Config::default();
        config.b.pop();

        assert!(matches!(run(config), Err(Error::Config(_))));
    }
}
