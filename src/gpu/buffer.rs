//! Device buffers with blocking host transfers.

use super::context::ComputeContext;
use crate::error::{Error, Result};
use futures::channel::oneshot;

/// Direction of a buffer as seen by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Kernel input. The host copies in, the kernel only reads.
    ReadOnly,
    /// Kernel output. The kernel writes, the host copies out.
    WriteOnly,
}

impl Access {
    /// Usage flags for a buffer of this direction
    pub fn usages(&self) -> wgpu::BufferUsages {
        match self {
            Access::ReadOnly => wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            Access::WriteOnly => wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        }
    }
}

/// Byte size of a buffer holding `len` `i32` elements.
pub fn byte_size(len: usize) -> u64 {
    (len * std::mem::size_of::<i32>()) as u64
}

/// Device-resident `i32` array. Released when dropped.
#[derive(Debug)]
pub struct DeviceBuffer {
    buffer: wgpu::Buffer,
    len: usize,
    access: Access,
}

impl DeviceBuffer {
    /// Allocate room for `len` elements. Fails if the device rejects the
    /// allocation or runs out of memory.
    pub fn new(ctx: &ComputeContext, label: &str, access: Access, len: usize) -> Result<Self> {
        let buffer = ctx.scoped(
            |device| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(label),
                    size: byte_size(len),
                    usage: access.usages(),
                    mapped_at_creation: false,
                })
            },
            |msg| Error::device(format!("allocating {}: {}", label, msg)),
        )?;

        Ok(Self { buffer, len, access })
    }

    /// Copy `data` into the buffer and wait for the device to finish the copy.
    pub fn write_blocking(&self, ctx: &ComputeContext, data: &[i32]) -> Result<()> {
        self.check_len(data.len())?;
        if self.access != Access::ReadOnly {
            return Err(Error::transfer("cannot write into a kernel output buffer"));
        }

        ctx.queue().write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        ctx.queue().submit(std::iter::empty());
        ctx.finish()?;

        log::debug!("wrote {} bytes to device", self.byte_size());
        Ok(())
    }

    /// Copy the buffer back to the host, blocking until the data is mapped.
    pub fn read_blocking(&self, ctx: &ComputeContext) -> Result<Vec<i32>> {
        if self.access != Access::WriteOnly {
            return Err(Error::transfer("cannot read back a kernel input buffer"));
        }

        let size = self.byte_size();
        let (staging, commands) = ctx.scoped(
            |device| {
                let staging = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("vecadd-staging"),
                    size,
                    usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("vecadd-read-encoder"),
                });
                encoder.copy_buffer_to_buffer(&self.buffer, 0, &staging, 0, size);
                (staging, encoder.finish())
            },
            Error::transfer,
        )?;
        ctx.queue().submit(Some(commands));

        let slice = staging.slice(..);
        let (tx, rx) = oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        ctx.finish()?;

        pollster::block_on(rx)
            .map_err(|_| Error::transfer("map callback dropped"))?
            .map_err(|e| Error::transfer(e.to_string()))?;

        let data = slice.get_mapped_range();
        let values: Vec<i32> = bytemuck::cast_slice::<u8, i32>(&data).to_vec();
        drop(data);
        staging.unmap();

        log::debug!("read {} bytes from device", size);
        Ok(values)
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.len {
            return Err(Error::SizeMismatch {
                expected: self.len,
                actual,
            });
        }
        Ok(())
    }

    /// Get the underlying wgpu buffer
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Element count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length buffer
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get buffer size in bytes
    pub fn byte_size(&self) -> u64 {
        byte_size(self.len)
    }

    /// Direction this buffer was allocated for
    pub fn access(&self) -> Access {
        self.access
    }
}
