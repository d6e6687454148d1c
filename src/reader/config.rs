use crate::format::MAX_DATA_SIZE;
use crate::{Error, Result};

/// What to do with a tag whose discriminator is not audio, video or script data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Stop with `Error::UnsupportedTagType`
    #[default]
    Fail,
    /// Read past the body, verify the size echo and continue with the next tag
    Skip,
}

/// How script data bodies are decoded while framing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptDataMode {
    /// Length-prefixed type/length/value scan up to the end marker
    #[default]
    Scan,
    /// Check the end marker only; decode later with `ScriptDataPayload::values`
    Deferred,
}

#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Handling of unknown tag types
    pub unknown_tags: UnknownTagPolicy,

    /// Script data decoding
    pub script_data: ScriptDataMode,

    /// Largest accepted tag body, checked before the body is buffered
    pub max_data_size: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            unknown_tags: UnknownTagPolicy::Fail,
            script_data: ScriptDataMode::Scan,
            max_data_size: MAX_DATA_SIZE,
        }
    }
}

impl ReaderConfig {
    /// Create config builder
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_data_size == 0 {
            return Err(Error::config("Invalid max_data_size: 0"));
        }

        if self.max_data_size > MAX_DATA_SIZE {
            return Err(Error::config(format!(
                "max_data_size must not exceed {} (24-bit field)",
                MAX_DATA_SIZE
            )));
        }

        Ok(())
    }
}

/// Builder for ReaderConfig
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    /// Create new builder
    pub fn new() -> Self {
        ReaderConfigBuilder {
            config: ReaderConfig::default(),
        }
    }

    /// Set unknown tag handling
    pub fn unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.config.unknown_tags = policy;
        self
    }

    /// Set script data decoding
    pub fn script_data(mut self, mode: ScriptDataMode) -> Self {
        self.config.script_data = mode;
        self
    }

    /// Set body size limit
    pub fn max_data_size(mut self, size: u32) -> Self {
        self.config.max_data_size = size;
        self
    }

    /// Build configuration
    pub fn build(self) -> Result<ReaderConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ReaderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
