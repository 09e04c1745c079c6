use crate::error::{Error, Result};
use crate::gpu::kernel::{VEC_ADD_ENTRY, VEC_ADD_SOURCE};

/// Number of elements in each input array.
pub const SIZE: usize = 8;

pub const INPUT_A: [i32; SIZE] = [3, 3, 3, 3, 3, 3, 4, 4];
pub const INPUT_B: [i32; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8];

#[derive(Debug, Clone)]
pub struct Config {
    /// Backends searched for platforms. An empty set finds none.
    pub backends: wgpu::Backends,
    pub kernel_source: String,
    pub entry_point: String,
    pub a: Vec<i32>,
    pub b: Vec<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            kernel_source: VEC_ADD_SOURCE.to_string(),
            entry_point: VEC_ADD_ENTRY.to_string(),
            a: INPUT_A.to_vec(),
            b: INPUT_B.to_vec(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.a.is_empty() {
            return Err(Error::config("input arrays must not be empty"));
        }
        if self.a.len() != self.b.len() {
            return Err(Error::config(format!(
                "input arrays differ in length ({} vs {})",
                self.a.len(),
                self.b.len()
            )));
        }
        if u32::try_from(self.a.len()).is_err() {
            return Err(Error::config("input arrays too large (max u32::MAX elements)"));
        }
        if self.entry_point.trim().is_empty() {
            return Err(Error::config("entry_point must not be empty"));
        }

        Ok(())
    }

    /// Element count shared by every buffer of a run.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn backends(mut self, backends: wgpu::Backends) -> Self {
        self.config.backends = backends;
        self
    }

    pub fn kernel_source<S: Into<String>>(mut self, source: S) -> Self {
        self.config.kernel_source = source.into();
        self
    }

    pub fn entry_point<S: Into<String>>(mut self, name: S) -> Self {
        self.config.entry_point = name.into();
        self
    }

    pub fn inputs(mut self, a: Vec<i32>, b: Vec<i32>) -> Self {
        self.config.a = a;
        self.config.b = b;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
