//! Test client for OpenAI-compatible multimodal chat-completion endpoints.
//!
//! The crate reads a local image, embeds it as a base64 data URI in a chat
//! request next to a system prompt and a user instruction, posts it to the
//! endpoint and prints the analysis the model returns.
//!
//! ```no_run
//! use infernum_vision::{VisionClientConfig, run};
//! use std::path::Path;
//!
//! # async fn demo() -> infernum_vision::Result<()> {
//! let config = VisionClientConfig::default();
//! let analysis = run(&config, Path::new("email_001.png"), &mut std::io::stdout()).await?;
//! assert!(!analysis.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod messages;
pub mod report;

pub use client::{ChatCompletionResult, VisionClient};
pub use config::VisionClientConfig;
pub use error::{ErrorKind, Result, VisionError};
pub use image::{EncodedImage, ImageFormat};
pub use messages::{ChatRequest, ChatResponse};

use std::{io::Write, path::Path};

/// Runs one analysis of the image at `image_path` against `config.url`.
///
/// Progress and the analysis, bracketed by banners, are written to `out`.
/// The image is read before any output is produced, so a missing file fails
/// with [`VisionError::FileNotFound`] without touching the network.
///
/// # Arguments
/// * `config` - Endpoint, model, prompts, sampling parameters and timeout
/// * `image_path` - The PNG/JPEG image to analyze
/// * `out` - Where progress and results are printed
///
/// # Returns
/// The analysis text taken from the first choice of the response
pub async fn run<W: Write>(
    config: &VisionClientConfig,
    image_path: &Path,
    out: &mut W,
) -> Result<String> {
    config.validate()?;

    let image = EncodedImage::load(image_path).await?;
    let client = VisionClient::new(config)?;

    report::header(out, image_path, client.url())?;
    writeln!(
        out,
        "Encoded image ({} bytes, {})",
        image.byte_len(),
        image.format().mime_type()
    )?;

    let request = ChatRequest::analysis(config, &image);

    writeln!(out, "Sending request to API...")?;
    writeln!(out)?;
    out.flush()?;

    let response = client.complete(&request).await?;
    let analysis = response.analysis()?.to_string();

    log::info!("Received analysis of {} characters", analysis.len());

    report::analysis(out, &analysis)?;

    Ok(analysis)
}
