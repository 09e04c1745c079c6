//! The compute procedure: resolve, compile, upload, dispatch, read back.

use crate::config::Config;
use crate::error::Result;
use crate::gpu::buffer::{Access, DeviceBuffer};
use crate::gpu::context::ComputeContext;
use crate::gpu::dispatch::enqueue_nd_range;
use crate::gpu::kernel::Program;
use crate::gpu::platform;
use crate::report::Report;
use crate::telemetry::{Phase, Timeline};

/// A device opened for one configuration.
///
/// Dropping the session releases the queue, the device and every buffer it
/// created, on success and error paths alike.
#[derive(Debug)]
pub struct Session {
    config: Config,
    ctx: ComputeContext,
    timeline: Timeline,
    _instance: wgpu::Instance,
}

impl Session {
    /// Resolve the first platform and device and create a context on it.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let timeline = Timeline::new();

        let (instance, ctx) = {
            let _phase = timeline.enter(Phase::Resolve);
            let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
                backends: config.backends,
                ..Default::default()
            });
            let selection = platform::resolve(&instance, config.backends)?;
            let ctx = ComputeContext::new(selection)?;
            (instance, ctx)
        };

        Ok(Self {
            config,
            ctx,
            timeline,
            _instance: instance,
        })
    }

    /// Name of the selected platform
    pub fn platform_name(&self) -> &str {
        self.ctx.platform_name()
    }

    /// Name of the selected device
    pub fn device_name(&self) -> &str {
        self.ctx.device_name()
    }

    /// Get the device context
    pub fn context(&self) -> &ComputeContext {
        &self.ctx
    }

    /// Get the configuration this session runs
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Phase timings of the open step and the latest run
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Compile the kernel and compute `C = A + B` on the device.
    pub fn run(&self) -> Result<Report> {
        let config = &self.config;
        let ctx = &self.ctx;
        let len = config.len();

        // Keep only the resolve phase from earlier runs.
        self.timeline.retain(|r| r.phase == Phase::Resolve);
        let mark = self.timeline.len();

        let kernel = {
            let _phase = self.timeline.enter(Phase::Compile);
            let program = Program::build(ctx, &config.kernel_source, &config.entry_point)?;
            program.kernel(ctx, program.entry_point())?
        };

        let buffer_a = DeviceBuffer::new(ctx, "vecadd-a", Access::ReadOnly, len)?;
        let buffer_b = DeviceBuffer::new(ctx, "vecadd-b", Access::ReadOnly, len)?;
        let buffer_c = DeviceBuffer::new(ctx, "vecadd-c", Access::WriteOnly, len)?;

        {
            let _phase = self.timeline.enter(Phase::Upload);
            buffer_a.write_blocking(ctx, &config.a)?;
            buffer_b.write_blocking(ctx, &config.b)?;
        }

        {
            let _phase = self.timeline.enter(Phase::Dispatch);
            let bindings = kernel.bind(ctx, [&buffer_a, &buffer_b, &buffer_c])?;
            // Config::validate bounds len to u32.
            enqueue_nd_range(ctx, &kernel, &bindings, len as u32)?;
            ctx.finish()?;
        }

        let c = {
            let _phase = self.timeline.enter(Phase::ReadBack);
            buffer_c.read_blocking(ctx)?
        };

        log::debug!("run finished in {:?}", self.timeline.total_since(mark));
        Ok(Report::new(&config.a, &config.b, &c))
    }
}

/// Open a session for `config` and run it once.
pub fn run(config: Config) -> Result<Report> {
    Session::open(config)?.run()
}
