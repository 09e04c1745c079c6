//! Kernel compilation.
//!
//! Source is checked with the WGSL front end first so a rejected kernel
//! reports the compiler's full diagnostic, then compiled on the device inside
//! a validation error scope. Compilation is all-or-nothing.

use super::buffer::DeviceBuffer;
use super::context::ComputeContext;
use crate::error::{Error, Result};

/// Entry point of [`VEC_ADD_SOURCE`].
pub const VEC_ADD_ENTRY: &str = "vec_add";

/// `C[i] = A[i] + B[i]`, one invocation per element.
pub const VEC_ADD_SOURCE: &str = r#"
@group(0) @binding(0) var<storage, read> a: array<i32>;
@group(0) @binding(1) var<storage, read> b: array<i32>;
@group(0) @binding(2) var<storage, read_write> c: array<i32>;

@compute @workgroup_size(1)
fn vec_add(@builtin(global_invocation_id) id: vec3<u32>) {
    let i = id.x;
    c[i] = a[i] + b[i];
}
"#;

/// Number of buffer arguments a kernel takes: two inputs and one output.
pub const ARG_COUNT: usize = 3;

/// Parse and validate `source`, and require a compute entry point named
/// `entry_point`. The error log is rendered against the source text.
pub fn check_source(source: &str, entry_point: &str) -> Result<naga::Module> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| Error::build(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| Error::build(e.emit_to_string(source)))?;

    if !has_compute_entry(&module, entry_point) {
        return Err(Error::build(format!(
            "no compute entry point named `{}`",
            entry_point
        )));
    }

    Ok(module)
}

fn has_compute_entry(module: &naga::Module, name: &str) -> bool {
    module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == naga::ShaderStage::Compute)
}

/// A compiled kernel source.
#[derive(Debug)]
pub struct Program {
    module: wgpu::ShaderModule,
    ir: naga::Module,
    entry_point: String,
}

impl Program {
    /// Compile `source` for the context's device.
    pub fn build(ctx: &ComputeContext, source: &str, entry_point: &str) -> Result<Self> {
        let ir = check_source(source, entry_point)?;

        let module = ctx.scoped(
            |device| {
                device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("vecadd-program"),
                    source: wgpu::ShaderSource::Wgsl(source.into()),
                })
            },
            Error::build,
        )?;

        log::info!("compiled program with entry point {}", entry_point);
        Ok(Self {
            module,
            ir,
            entry_point: entry_point.to_string(),
        })
    }

    /// Entry point the program was checked against
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Extract the kernel named `name`.
    pub fn kernel(&self, ctx: &ComputeContext, name: &str) -> Result<Kernel> {
        if !has_compute_entry(&self.ir, name) {
            return Err(Error::build(format!("no compute entry point named `{}`", name)));
        }

        let storage = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let (bind_group_layout, pipeline) = ctx.scoped(
            |device| {
                let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("vecadd-layout"),
                    entries: &[storage(0, true), storage(1, true), storage(2, false)],
                });

                let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("vecadd-pipeline-layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });

                let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some("vecadd-pipeline"),
                    layout: Some(&pipeline_layout),
                    module: &self.module,
                    entry_point: name,
                });
                (bind_group_layout, pipeline)
            },
            Error::build,
        )?;

        Ok(Kernel {
            pipeline,
            bind_group_layout,
            name: name.to_string(),
        })
    }
}

/// A kernel ready for binding and dispatch.
#[derive(Debug)]
pub struct Kernel {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    name: String,
}

impl Kernel {
    /// Bind buffers as kernel arguments, in positional order A, B, C.
    ///
    /// Buffers must have equal length. A binding the device rejects, such as
    /// a zero-length buffer, is an `Error::Dispatch`.
    pub fn bind(
        &self,
        ctx: &ComputeContext,
        args: [&DeviceBuffer; ARG_COUNT],
    ) -> Result<wgpu::BindGroup> {
        let len = args[0].len();
        if let Some(bad) = args.iter().find(|buf| buf.len() != len) {
            return Err(Error::SizeMismatch {
                expected: len,
                actual: bad.len(),
            });
        }

        let entries: Vec<wgpu::BindGroupEntry> = args
            .iter()
            .enumerate()
            .map(|(i, buf)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: buf.buffer().as_entire_binding(),
            })
            .collect();

        ctx.scoped(
            |device| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("vecadd-args"),
                    layout: &self.bind_group_layout,
                    entries: &entries,
                })
            },
            |msg| Error::dispatch(format!("binding arguments of {}: {}", self.name, msg)),
        )
    }

    /// Get the compute pipeline
    pub fn pipeline(&self) -> &wgpu::ComputePipeline {
        &self.pipeline
    }

    /// Entry point name
    pub fn name(&self) -> &str {
        &self.name
    }
}
