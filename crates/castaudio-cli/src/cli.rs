use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "castaudio",
    about = "Speak text or play local audio on a cast device found via mDNS",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize text to speech and play it on the device
    Say {
        /// Text to speak
        text: String,
        /// Language code (falls back to the configured default)
        #[arg(long, env = "CASTAUDIO_LANG")]
        lang: Option<String>,
        /// Skip the local audio cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Play a local audio file on the device
    File {
        /// Path to the file to cast
        path: PathBuf,
    },

    /// Resolve the device and print its address
    Discover {
        /// Discovery timeout in seconds
        #[arg(long, default_value_t = 3)]
        timeout_secs: u64,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn say_parses_text_and_lang() {
        let cli = Cli::try_parse_from(["castaudio", "say", "hallo welt", "--lang", "de"]).unwrap();
        match cli.command {
            Commands::Say { text, lang, no_cache } => {
                assert_eq!(text, "hallo welt");
                assert_eq!(lang.as_deref(), Some("de"));
                assert!(!no_cache);
            }
            _ => panic!("expected say"),
        }
    }

    #[test]
    fn say_lang_defaults_to_none() {
        let cli = Cli::try_parse_from(["castaudio", "say", "hi"]).unwrap();
        assert!(matches!(cli.command, Commands::Say { lang: None, .. }));
    }

    #[test]
    fn file_parses_path() {
        let cli = Cli::try_parse_from(["castaudio", "file", "/tmp/clip.wav"]).unwrap();
        match cli.command {
            Commands::File { path } => assert_eq!(path, PathBuf::from("/tmp/clip.wav")),
            _ => panic!("expected file"),
        }
    }

    #[test]
    fn discover_has_default_timeout() {
        let cli = Cli::try_parse_from(["castaudio", "discover"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Discover { timeout_secs: 3 }
        ));
    }

    #[test]
    fn missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["castaudio"]).is_err());
    }
}
