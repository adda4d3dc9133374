use std::process::ExitCode;

use display_error_chain::DisplayErrorChain;
use finsight_gemini::{Error, GeminiClient, ModelId};
use tracing::{error, info};

async fn do_main(api_key: &str) -> Result<(), Error> {
    let client = GeminiClient::builder(api_key)
        .with_model(ModelId::Gemini25Pro)
        .build()?;

    info!(model = client.model().as_str(), "sending generation request");

    let response = client
        .generate_text("In two sentences, what does a price-to-earnings ratio tell an investor?")
        .await?;

    info!(reply = response.text(), "generation response received");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let api_key = std::env::var("GEMINI_API_KEY").expect("no gemini api key provided");

    match do_main(&api_key).await {
        Err(err) => {
            let formatted = DisplayErrorChain::new(err).to_string();
            error!(error = formatted, "request failed");
            ExitCode::FAILURE
        }
        _ => {
            info!("generation request completed successfully");
            ExitCode::SUCCESS
        }
    }
}
