use anyhow::Result;
use clap::Parser;
use storyforge::app::App;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storyforge")]
#[command(about = "Generate an AI-illustrated short story for a topic")]
struct CliArgs {
    /// Topic to generate a story about, e.g. "a magical forest where animals
    /// play musical instruments".
    #[arg(value_name = "TOPIC")]
    topic: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match app.run(&args.topic).await {
            Ok(_) => {
                info!("Story generated successfully");
                Ok(())
            }
            Err(e) => {
                error!("Generation failed: {}", e);
                eprintln!("Troubleshooting tips:");
                eprintln!("1. Check that TOGETHER_API_KEY is configured");
                eprintln!("2. Try again in a few minutes if the service is busy");
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
