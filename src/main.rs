use argh::FromArgs;
use infernum_vision::{VisionClientConfig, config, report};
use std::{path::PathBuf, process::ExitCode, time::Duration};

const PROGRAM: &str = "infernum-vision";

#[derive(FromArgs)]
/// Send an image to an OpenAI-compatible vision endpoint and print the analysis.
struct VisionArgs {
    /// the chat-completion endpoint to post to
    #[argh(option, short = 'u', default = "config::DEFAULT_API_URL.to_string()")]
    url: String,

    /// the model identifier to request
    #[argh(option, short = 'm', default = "config::DEFAULT_MODEL.to_string()")]
    model: String,

    /// seconds to wait for the response
    #[argh(option, short = 't', default = "config::DEFAULT_TIMEOUT.as_secs()")]
    timeout: u64,

    /// the path to the image
    #[argh(positional)]
    image: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let args: VisionArgs = argh::from_env();

    let Some(image) = args.image else {
        // exit status already signals the failure if stderr is gone
        let _ = report::usage(&mut std::io::stderr(), PROGRAM);
        return ExitCode::FAILURE;
    };

    let config = VisionClientConfig::default()
        .with_url(args.url)
        .with_model(args.model)
        .with_timeout(Duration::from_secs(args.timeout));

    match infernum_vision::run(&config, &image, &mut std::io::stdout()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // the printed report is the user-facing diagnostic
            log::debug!("Analysis failed ({}): {e}", e.kind().as_str());
            let _ = report::error(&mut std::io::stderr(), &e);
            ExitCode::FAILURE
        }
    }
}
