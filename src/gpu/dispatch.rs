//! Kernel dispatch.

use super::context::ComputeContext;
use super::kernel::Kernel;
use crate::error::{Error, Result};

/// Enqueue `global_size` independent invocations of `kernel`.
///
/// The kernel declares a workgroup size of 1, so one workgroup is one work
/// item and no chunking is applied. Returns without waiting; call
/// [`ComputeContext::finish`] to block until the work completes.
pub fn enqueue_nd_range(
    ctx: &ComputeContext,
    kernel: &Kernel,
    bindings: &wgpu::BindGroup,
    global_size: u32,
) -> Result<wgpu::SubmissionIndex> {
    let max = ctx.device().limits().max_compute_workgroups_per_dimension;
    if global_size > max {
        return Err(Error::dispatch(format!(
            "global size {} exceeds device limit {}",
            global_size, max
        )));
    }

    let commands = ctx.scoped(
        |device| {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vecadd-dispatch-encoder"),
            });

            {
                let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("vecadd-pass"),
                    timestamp_writes: None,
                });
                pass.set_pipeline(kernel.pipeline());
                pass.set_bind_group(0, bindings, &[]);
                pass.dispatch_workgroups(global_size, 1, 1);
            }

            encoder.finish()
        },
        |msg| Error::dispatch(format!("{}: {}", kernel.name(), msg)),
    )?;

    log::debug!("enqueued {} with global size {}", kernel.name(), global_size);
    Ok(ctx.queue().submit(Some(commands)))
}
