use thiserror::Error;

use crate::controller::DEFAULT_POLL_INTERVAL_MS;

const DEFAULT_CONTAINER_ID: &str = "player";
const DEFAULT_LEFT_CONTAINER_ID: &str = "stream-left";
const DEFAULT_RIGHT_CONTAINER_ID: &str = "stream-right";

/// Settings shared by the exported dispatchers, given once at construction and updatable
/// afterwards through their setters.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EmbedConfiguration {
    /// Domain of the page the embeds are shown in.
    ///
    /// Twitch refuses to play in an embed whose `parent` is not the embedding page's domain, so
    /// it has to be communicated by the JavaScript-side and can never be empty.
    pub(crate) parent_domain: String,

    /// Interval, in milliseconds, at which the current time and duration of a playing player
    /// are read.
    pub(crate) poll_interval_ms: u32,

    /// If `true`, newly created players start playing as soon as they are ready.
    pub(crate) autoplay: bool,

    /// Identifier of the page element the single player is created in.
    pub(crate) container_id: String,

    /// Identifiers of the page elements the left and right players of the multi-view page are
    /// created in.
    pub(crate) multi_view_containers: (String, String),
}

impl EmbedConfiguration {
    /// Create the default configuration for a page served from `parent_domain`.
    pub(crate) fn new(parent_domain: String) -> Result<Self, ConfigurationError> {
        let config = Self {
            parent_domain: parent_domain.trim().to_owned(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            autoplay: true,
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            multi_view_containers: (
                DEFAULT_LEFT_CONTAINER_ID.to_owned(),
                DEFAULT_RIGHT_CONTAINER_ID.to_owned(),
            ),
        };
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if self.parent_domain.is_empty() {
            return Err(ConfigurationError::MissingParentDomain);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigurationError::InvalidPollInterval);
        }
        Ok(())
    }

    /// Update the polling interval, refusing a `0` interval.
    pub(crate) fn update_poll_interval(
        &mut self,
        poll_interval_ms: u32,
    ) -> Result<(), ConfigurationError> {
        if poll_interval_ms == 0 {
            return Err(ConfigurationError::InvalidPollInterval);
        }
        self.poll_interval_ms = poll_interval_ms;
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("A parent domain is required to embed players")]
    MissingParentDomain,
    #[error("The polling interval has to be at least 1 millisecond")]
    InvalidPollInterval,
}
