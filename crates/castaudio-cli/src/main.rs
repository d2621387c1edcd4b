use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Say { text, lang, no_cache } => {
            castaudio_cast::commands::say(&text, lang.as_deref(), no_cache).await?;
        }

        cli::Commands::File { path } => {
            castaudio_cast::commands::cast_file(&path).await?;
        }

        cli::Commands::Discover { timeout_secs } => {
            castaudio_cast::commands::discover_device(timeout_secs).await?;
        }

        cli::Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(shell, &mut cli::Cli::command(), "castaudio", &mut std::io::stdout());
        }
    }

    Ok(())
}
