use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

const TTS_ENDPOINT: &str = "https://www.google.com/async/translate_tts";

#[derive(Deserialize)]
struct TtsBody {
    translate_tts: Vec<String>,
}

/// Synthesize `text` in `lang` via the translate TTS endpoint, returning the
/// decoded audio bytes (MP3).
pub async fn synthesize(text: &str, lang: &str) -> anyhow::Result<Vec<u8>> {
    // The text is embedded inside the ttsp parameter, which the endpoint
    // decodes a second time, hence the double escaping of '%'.
    let escaped = urlencoding::encode(text).replace('%', "%25");
    let url =
        format!("{TTS_ENDPOINT}?ttsp=tl:{lang},txt:{escaped},spd:1.1&async=_fmt:jspb");

    let resp = reqwest::get(&url).await?;
    if !resp.status().is_success() {
        anyhow::bail!("TTS request failed (HTTP {})", resp.status());
    }

    let body = resp.bytes().await?;
    let audio = decode_response(&body)?;
    debug!(bytes = audio.len(), lang, "speech synthesized");
    Ok(audio)
}

/// The jspb framing is an anti-XSSI header line followed by exactly one JSON
/// line of the form `{"translate_tts": ["<base64 audio>"]}`.
fn decode_response(body: &[u8]) -> anyhow::Result<Vec<u8>> {
    let segments: Vec<&[u8]> = body.split(|&b| b == b'\n').collect();
    if segments.len() != 2 {
        anyhow::bail!("unexpected TTS response shape");
    }

    let parsed: TtsBody = serde_json::from_slice(segments[1])?;
    let encoded = parsed
        .translate_tts
        .first()
        .ok_or_else(|| anyhow::anyhow!("TTS response carried no audio"))?;

    Ok(B64.decode(encoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_jspb_framed_audio() {
        let audio = b"ID3 fake mp3 bytes";
        let body = format!(")]}}'\n{{\"translate_tts\": [\"{}\"]}}", B64.encode(audio));

        let decoded = decode_response(body.as_bytes()).unwrap();
        assert_eq!(decoded, audio);
    }

    #[test]
    fn rejects_single_segment_body() {
        assert!(decode_response(b"{\"translate_tts\": []}").is_err());
    }

    #[test]
    fn rejects_extra_segments() {
        assert!(decode_response(b"a\nb\nc").is_err());
    }

    #[test]
    fn rejects_empty_audio_list() {
        assert!(decode_response(b")]}'\n{\"translate_tts\": []}").is_err());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(decode_response(b")]}'\nnot json").is_err());
    }
}
