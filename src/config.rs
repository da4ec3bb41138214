use crate::error::{Result, VisionError};
use std::time::Duration;

/// Default OpenAI-compatible chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:8001/v1/chat/completions";

/// Default model identifier served by the endpoint.
pub const DEFAULT_MODEL: &str = "qwen2vl-email-analyzer";

/// Default bounded wait for a response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default bound on establishing the TCP connection, within [`DEFAULT_TIMEOUT`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_MAX_TOKENS: u32 = 2048;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Instruction template sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are an expert email marketing analyst specializing in retail e-commerce campaigns.
Analyze the email screenshot provided and give detailed, actionable feedback following this structure:

**LIFECYCLE CONTEXT:** Identify the campaign stage (Welcome, Abandoned Cart, Re-engagement, etc.) and relevant industry benchmarks.
**SUBJECT (X/10):** Score and analyze the subject line effectiveness.
**BODY (X/10):** Score and analyze the email body content and messaging.
**CTA (X/10):** Score and analyze the call-to-action placement and effectiveness.
**TECHNICAL/GDPR (X/10):** Score technical implementation and compliance.
**CONVERSION IMPACT:** Estimate conversion rate improvements with specific metrics.
**ACTIONS:** Provide numbered, specific recommendations with quantified impact.
**TRANSFERABLE LESSONS:** Extract behavioral psychology principles that apply across campaigns.

Base your analysis on visual elements, design choices, and overall email effectiveness.";

/// Instruction sent alongside the image in the user message.
pub const USER_PROMPT: &str = "Analyze this email marketing campaign screenshot and provide detailed feedback following the structure specified in the system prompt.";

/// Everything a single analysis run needs besides the image itself.
///
/// Built with [`Default`] and adjusted with the `with_*` methods:
///
/// ```
/// use infernum_vision::VisionClientConfig;
/// use std::time::Duration;
///
/// let config = VisionClientConfig::default()
///     .with_url("http://127.0.0.1:9000/v1/chat/completions")
///     .with_timeout(Duration::from_secs(30));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VisionClientConfig {
    /// The chat-completion endpoint to POST to.
    pub url: String,
    /// The model identifier placed in the request.
    pub model: String,
    /// Text of the system message.
    pub system_prompt: String,
    /// Text that follows the image in the user message.
    pub user_prompt: String,
    /// Cap on generated output length.
    pub max_tokens: u32,
    /// Sampling temperature, in `[0, 2]`.
    pub temperature: f32,
    /// How long to wait for the whole response.
    pub timeout: Duration,
    /// How long to wait for the connection; a stall here is a connection failure.
    pub connect_timeout: Duration,
}

impl Default for VisionClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: USER_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl VisionClientConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_user_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.user_prompt = prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Checks the values that would otherwise only fail at the server.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(VisionError::InvalidConfig(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(VisionError::InvalidConfig(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(VisionError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| VisionError::InvalidConfig(format!("invalid url {}: {e}", self.url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(VisionError::InvalidConfig(format!(
                "unsupported url scheme: {scheme}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_endpoint() {
        let config = VisionClientConfig::default();
        assert_eq!(config.url, "http://localhost:8001/v1/chat/completions");
        assert_eq!(config.model, "qwen2vl-email-analyzer");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.system_prompt.contains("**CTA (X/10):**"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        for temperature in [-0.1, 2.5, f32::NAN] {
            let config = VisionClientConfig::default().with_temperature(temperature);
            assert!(matches!(
                config.validate(),
                Err(VisionError::InvalidConfig(_))
            ));
        }
        let config = VisionClientConfig::default().with_temperature(2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = VisionClientConfig::default().with_max_tokens(0);
        assert!(config.validate().is_err());

        let config = VisionClientConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = VisionClientConfig::default().with_connect_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn url_must_be_http() {
        let config = VisionClientConfig::default().with_url("not a url");
        assert!(config.validate().is_err());

        let config = VisionClientConfig::default().with_url("ftp://localhost/v1/chat/completions");
        assert!(config.validate().is_err());

        let config = VisionClientConfig::default().with_url("https://example.com/v1/chat/completions");
        assert!(config.validate().is_ok());
    }
}
