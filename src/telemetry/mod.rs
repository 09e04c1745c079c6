//! Telemetry for the compute procedure.
//!
//! Records how long each phase of a run took. Durations are also emitted as
//! `debug` log records.

pub mod timeline;

pub use timeline::{Phase, PhaseGuard, PhaseRecord, Timeline};
