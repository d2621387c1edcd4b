use std::path::PathBuf;

use castaudio_core::config::config_dir;
use tracing::{debug, warn};

/// Content-addressed cache of previously synthesized audio, keyed by language
/// and an MD5 digest of the text. One file per entry, no eviction.
pub struct AudioCache {
    dir: PathBuf,
}

impl AudioCache {
    /// Cache rooted at ~/.castaudio/.
    pub fn open_default() -> Self {
        Self::at(config_dir())
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, text: &str, lang: &str) -> PathBuf {
        let hash = format!("{:x}", md5::compute(text.as_bytes()));
        self.dir.join(format!("{lang}_{hash}"))
    }

    /// Returns the cached audio for (text, lang) if present.
    pub fn lookup(&self, text: &str, lang: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(text, lang);
        let audio = std::fs::read(&path).ok()?;
        debug!(path = %path.display(), "audio cache hit");
        Some(audio)
    }

    /// Store synthesized audio. Best effort: a failed write only logs, the
    /// cast still proceeds with the in-memory bytes.
    pub fn store(&self, text: &str, lang: &str, audio: &[u8]) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!(error = %e, "could not create audio cache directory");
            return;
        }
        let path = self.entry_path(text, lang);
        if let Err(e) = std::fs::write(&path, audio) {
            warn!(path = %path.display(), error = %e, "could not write audio cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_lookup_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AudioCache::at(dir.path());

        cache.store("hallo welt", "de", b"mp3 bytes");
        assert_eq!(cache.lookup("hallo welt", "de").unwrap(), b"mp3 bytes");
    }

    #[test]
    fn lookup_misses_for_unknown_text() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AudioCache::at(dir.path());

        assert!(cache.lookup("never stored", "de").is_none());
    }

    #[test]
    fn entries_are_keyed_by_language() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AudioCache::at(dir.path());

        cache.store("hello", "de", b"german");
        assert!(cache.lookup("hello", "en").is_none());
        assert_eq!(cache.lookup("hello", "de").unwrap(), b"german");
    }

    #[test]
    fn entry_path_uses_lang_prefix_and_md5_hex() {
        let cache = AudioCache::at("/tmp/cache");
        let path = cache.entry_path("hello", "en");
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("en_"));
        // md5("hello")
        assert_eq!(name, "en_5d41402abc4b2a76b9719d911017c592");
    }
}
