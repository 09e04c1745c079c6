//! Device context: the logical device and its single command queue.

use super::platform::Selection;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Logical device and queue for the selected adapter.
#[derive(Debug)]
pub struct ComputeContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    platform_name: String,
    adapter_info: wgpu::AdapterInfo,
    uncaptured: Arc<Mutex<Vec<String>>>,
}

impl ComputeContext {
    /// Create the device and queue on the selected adapter.
    pub fn new(selection: Selection) -> Result<Self> {
        let Selection {
            platform_name,
            adapter,
            info,
        } = selection;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vecadd-device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
            },
            None,
        ))
        .map_err(|e| Error::request_device(format!("{}: {}", info.name, e)))?;

        // Errors outside an explicit scope would otherwise panic. They are
        // kept and reported by the next `finish`.
        let uncaptured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&uncaptured);
        device.on_uncaptured_error(Box::new(move |err: wgpu::Error| {
            log::error!("uncaptured device error: {}", err);
            sink.lock().push(err.to_string());
        }));

        Ok(Self {
            device,
            queue,
            platform_name,
            adapter_info: info,
            uncaptured,
        })
    }

    /// Run `op` inside validation and out-of-memory error scopes.
    ///
    /// A captured device error is turned into an `Err` by `on_error`, so the
    /// handle `op` produced is never returned when it is invalid.
    pub fn scoped<T, F, E>(&self, op: F, on_error: E) -> Result<T>
    where
        F: FnOnce(&wgpu::Device) -> T,
        E: FnOnce(String) -> Error,
    {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = op(&self.device);
        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());

        match validation.or(out_of_memory) {
            Some(err) => Err(on_error(err.to_string())),
            None => Ok(value),
        }
    }

    /// Get device reference
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Get queue reference
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Name of the platform (backend) the device belongs to
    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }

    /// Adapter name as reported by the driver
    pub fn device_name(&self) -> &str {
        &self.adapter_info.name
    }

    /// Get adapter info
    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Block until every submitted command has completed.
    ///
    /// Fails if the device reported an error outside an explicit scope since
    /// the last call.
    pub fn finish(&self) -> Result<()> {
        self.device.poll(wgpu::Maintain::Wait);

        let errors: Vec<String> = self.uncaptured.lock().drain(..).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::device(errors.join("; ")))
        }
    }
}
