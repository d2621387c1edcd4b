//! Content-type detection by magic-byte sniffing, covering the audio
//! containers a cast target can play plus a handful of common formats.

/// Returned when no signature matches.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Only the leading bytes are consulted.
const SNIFF_LEN: usize = 512;

/// Detect the MIME type of `data` from its leading bytes.
pub fn detect(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(SNIFF_LEN)];

    if let Some(mime) = detect_riff(head) {
        return mime;
    }

    for (prefix, mime) in EXACT_SIGNATURES {
        if head.starts_with(prefix) {
            return mime;
        }
    }

    // Raw MPEG audio frame sync (MP3 without an ID3 tag).
    if head.len() >= 2 && head[0] == 0xFF && head[1] & 0xFE == 0xFA {
        return "audio/mpeg";
    }

    if head.len() >= 12 && &head[4..8] == b"ftyp" && &head[8..11] == b"M4A" {
        return "audio/mp4";
    }

    if head.len() >= 12 && head.starts_with(b"FORM") && &head[8..12] == b"AIFF" {
        return "audio/aiff";
    }

    OCTET_STREAM
}

const EXACT_SIGNATURES: &[(&[u8], &str)] = &[
    (b"ID3", "audio/mpeg"),
    (b"OggS\0", "application/ogg"),
    (b"fLaC", "audio/flac"),
    (b"MThd", "audio/midi"),
    (b".snd", "audio/basic"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
];

/// RIFF containers carry the real format at offset 8.
fn detect_riff(head: &[u8]) -> Option<&'static str> {
    if head.len() < 12 || !head.starts_with(b"RIFF") {
        return None;
    }
    let form = &head[8..12];
    if form == b"WAVE" {
        Some("audio/wave")
    } else if form == b"AVI " {
        Some("video/avi")
    } else {
        None
    }
}
