pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No platforms available!")]
    NoPlatforms,

    #[error("No devices available!")]
    NoDevices { platform: String },

    #[error("Cannot compile: {log}")]
    Build { log: String },

    #[error("device request failed: {0}")]
    RequestDevice(String),

    #[error("device error: {0}")]
    Device(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("transfer error: {0}")]
    Transfer(String),

    #[error("size mismatch: buffer holds {expected} elements, host slice has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub fn build<S: Into<String>>(log: S) -> Self {
        Error::Build { log: log.into() }
    }

    pub fn request_device<S: Into<String>>(msg: S) -> Self {
        Error::RequestDevice(msg.into())
    }

    pub fn device<S: Into<String>>(msg: S) -> Self {
        Error::Device(msg.into())
    }

    pub fn dispatch<S: Into<String>>(msg: S) -> Self {
        Error::Dispatch(msg.into())
    }

    pub fn transfer<S: Into<String>>(msg: S) -> Self {
        Error::Transfer(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Process exit status for this failure. Every failure is fatal.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_embeds_log() {
        let err = Error::build("error: expected ';'");
        assert_eq!(err.to_string(), "Cannot compile: error: expected ';'");
    }

    #[test]
    fn test_resolution_messages() {
        assert_eq!(Error::NoPlatforms.to_string(), "No platforms available!");
        let err = Error::NoDevices {
            platform: "Vulkan".to_string(),
        };
        assert_eq!(err.to_string(), "No devices available!");
    }

    #[test]
    fn test_dispatch_is_not_a_config_error() {
        let err = Error::dispatch("global size 70000 exceeds device limit 65535");
        assert_eq!(
            err.to_string(),
            "dispatch error: global size 70000 exceeds device limit 65535"
        );
        assert!(!matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_every_failure_exits_with_one() {
        let errors = [
            Error::NoPlatforms,
            Error::build("log"),
            Error::transfer("map failed"),
            Error::device("out of memory"),
            Error::dispatch("global size 70000 exceeds device limit 65535"),
            Error::config("bad"),
            Error::SizeMismatch {
                expected: 8,
                actual: 7,
            },
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), 1);
        }
    }
}
