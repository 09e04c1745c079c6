//! Platform and device discovery.
//!
//! A platform is a wgpu backend that exposes adapters; each adapter is a
//! device. Selection is deterministic: the first platform found and the first
//! device under it. There is no scoring.

use crate::error::{Error, Result};

/// A backend together with the adapters it exposes, in enumeration order.
#[derive(Debug)]
pub struct Platform {
    backend: wgpu::Backend,
    devices: Vec<wgpu::Adapter>,
}

impl Platform {
    pub fn backend(&self) -> wgpu::Backend {
        self.backend
    }

    /// Human-readable platform name.
    pub fn name(&self) -> String {
        backend_name(self.backend)
    }

    pub fn devices(&self) -> &[wgpu::Adapter] {
        &self.devices
    }
}

/// The platform and device a run will use.
#[derive(Debug)]
pub struct Selection {
    pub platform_name: String,
    pub adapter: wgpu::Adapter,
    pub info: wgpu::AdapterInfo,
}

impl Selection {
    pub fn device_name(&self) -> &str {
        &self.info.name
    }
}

pub fn backend_name(backend: wgpu::Backend) -> String {
    match backend {
        wgpu::Backend::Vulkan => "Vulkan".to_string(),
        wgpu::Backend::Metal => "Metal".to_string(),
        wgpu::Backend::Dx12 => "DirectX 12".to_string(),
        wgpu::Backend::Gl => "OpenGL".to_string(),
        wgpu::Backend::BrowserWebGpu => "WebGPU".to_string(),
        other => format!("{:?}", other),
    }
}

/// Group items by backend, keeping first-seen order of both backends and
/// items within a backend.
pub fn group_by_backend<T, F>(
    items: impl IntoIterator<Item = T>,
    backend_of: F,
) -> Vec<(wgpu::Backend, Vec<T>)>
where
    F: Fn(&T) -> wgpu::Backend,
{
    let mut groups: Vec<(wgpu::Backend, Vec<T>)> = Vec::new();

    for item in items {
        let backend = backend_of(&item);
        match groups.iter_mut().find(|(b, _)| *b == backend) {
            Some((_, members)) => members.push(item),
            None => groups.push((backend, vec![item])),
        }
    }

    groups
}

/// Index-0 lookup. `on_empty` builds the error for an empty list.
pub fn select_first<T, F>(items: Vec<T>, on_empty: F) -> Result<T>
where
    F: FnOnce() -> Error,
{
    items.into_iter().next().ok_or_else(on_empty)
}

/// Enumerate adapters of every type under `backends` and group them into
/// platforms.
pub fn enumerate_platforms(instance: &wgpu::Instance, backends: wgpu::Backends) -> Vec<Platform> {
    if backends.is_empty() {
        return Vec::new();
    }

    let adapters = instance.enumerate_adapters(backends);
    log::debug!("enumerated {} adapter(s)", adapters.len());

    group_by_backend(adapters, |adapter| adapter.get_info().backend)
        .into_iter()
        .map(|(backend, devices)| Platform { backend, devices })
        .collect()
}

/// Pick the first platform, then the first device under it.
pub fn resolve(instance: &wgpu::Instance, backends: wgpu::Backends) -> Result<Selection> {
    let platforms = enumerate_platforms(instance, backends);
    let platform = select_first(platforms, || Error::NoPlatforms)?;
    let platform_name = platform.name();
    log::info!("selected platform {}", platform_name);

    let adapter = select_first(platform.devices, || Error::NoDevices {
        platform: platform_name.clone(),
    })?;
    let info = adapter.get_info();
    log::info!(
        "selected device {} ({:?}, driver {} {})",
        info.name,
        info.device_type,
        info.driver,
        info.driver_info
    );

    Ok(Selection {
        platform_name,
        adapter,
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::Backend;

    #[test]
    fn test_select_first_takes_index_zero() {
        let picked = select_first(vec!["gpu0", "gpu1", "cpu0"], || Error::NoPlatforms).unwrap();
        assert_eq!(picked, "gpu0");
    }

    #[test]
    fn test_select_first_empty_uses_error() {
        let result = select_first(Vec::<u32>::new(), || Error::NoPlatforms);
        assert!(matches!(result, Err(Error::NoPlatforms)));
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let adapters = vec![
            (Backend::Gl, "llvmpipe"),
            (Backend::Vulkan, "discrete"),
            (Backend::Gl, "mesa"),
            (Backend::Vulkan, "integrated"),
        ];

        let groups = group_by_backend(adapters, |(backend, _)| *backend);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Backend::Gl);
        assert_eq!(groups[1].0, Backend::Vulkan);
        let gl: Vec<&str> = groups[0].1.iter().map(|(_, name)| *name).collect();
        assert_eq!(gl, vec!["llvmpipe", "mesa"]);
    }

    #[test]
    fn test_first_device_of_first_platform() {
        let adapters = vec![
            (Backend::Metal, "m1"),
            (Backend::Vulkan, "moltenvk"),
            (Backend::Metal, "m1-second"),
        ];

        let groups = group_by_backend(adapters, |(backend, _)| *backend);
        let (_, devices) = select_first(groups, || Error::NoPlatforms).unwrap();
        let device = select_first(devices, || Error::NoDevices {
            platform: "Metal".to_string(),
        })
        .unwrap();

        assert_eq!(device, (Backend::Metal, "m1"));
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(backend_name(Backend::Vulkan), "Vulkan");
        assert_eq!(backend_name(Backend::Dx12), "DirectX 12");
        assert_eq!(backend_name(Backend::Gl), "OpenGL");
    }

    #[test]
    fn test_empty_backend_set_finds_no_platforms() {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::empty(),
            ..Default::default()
        });

        assert!(enumerate_platforms(&instance, wgpu::Backends::empty()).is_empty());
        let result = resolve(&instance, wgpu::Backends::empty());
        assert!(matches!(result, Err(Error::NoPlatforms)));
    }
}
