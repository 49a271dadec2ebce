//! HTTP backend: multipart POST to an OpenAI-compatible
//! `/v1/audio/transcriptions` endpoint (whisper.cpp server, faster-whisper
//! server, llama-server and friends).

use std::time::Duration;

use uuid::Uuid;

use super::{TranscriptionError, Transcriber};
use crate::settings::SttSettings;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

pub struct HttpTranscriber {
    url: String,
    model: String,
    agent: ureq::Agent,
}

impl HttpTranscriber {
    pub fn new(settings: &SttSettings) -> Self {
        let url = format!(
            "{}/v1/audio/transcriptions",
            settings.endpoint.trim_end_matches('/')
        );
        log_info!("HttpTranscriber: endpoint {url}, model {}", settings.model);
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build();
        Self {
            url,
            model: settings.model.clone(),
            agent,
        }
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String, TranscriptionError> {
        let boundary = format!("----voicehome{}", Uuid::new_v4().simple());

        let mut body = Vec::with_capacity(audio.len() + 512);
        write_multipart_field(&mut body, &boundary, "model", &self.model);
        write_multipart_field(&mut body, &boundary, "response_format", "json");
        write_multipart_file(
            &mut body,
            &boundary,
            "file",
            filename,
            content_type_for(filename),
            audio,
        );
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let response = match self
            .agent
            .post(&self.url)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send_bytes(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(TranscriptionError::Status { code, body });
            }
            Err(err) => return Err(TranscriptionError::Request(err.to_string())),
        };

        let payload: serde_json::Value = response
            .into_json()
            .map_err(|err| TranscriptionError::MalformedResponse(err.to_string()))?;
        let text = extract_text(&payload)?;
        log_debug!("HTTP transcription: {text:?}");
        Ok(text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn extract_text(payload: &serde_json::Value) -> Result<String, TranscriptionError> {
    payload
        .get("text")
        .and_then(|value| value.as_str())
        .map(|text| text.trim().to_string())
        .ok_or_else(|| TranscriptionError::MalformedResponse("missing `text` field".into()))
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

fn write_multipart_field(body: &mut Vec<u8>, boundary: &str, field: &str, value: &str) {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

fn write_multipart_file(
    body: &mut Vec<u8>,
    boundary: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    let filename = quoted_filename(filename);
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
}

/// Makes a file name safe inside a quoted header parameter.
fn quoted_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_body_carries_fields_and_file() {
        let mut body = Vec::new();
        write_multipart_field(&mut body, "XYZ", "model", "whisper-medium");
        write_multipart_file(&mut body, "XYZ", "file", "clip.wav", "audio/wav", b"RIFF");
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with("--XYZ\r\nContent-Disposition: form-data; name=\"model\"\r\n\r\nwhisper-medium\r\n"));
        assert!(text.contains("name=\"file\"; filename=\"clip.wav\"\r\nContent-Type: audio/wav\r\n\r\nRIFF\r\n"));
    }

    #[test]
    fn file_names_cannot_break_the_header() {
        let mut body = Vec::new();
        write_multipart_file(&mut body, "XYZ", "file", "a\"b\r\nX-Evil: 1.wav", "audio/wav", b"");
        let text = String::from_utf8(body).unwrap();

        assert!(text.contains("filename=\"a'bX-Evil: 1.wav\"\r\n"));
        assert_eq!(text.matches("\r\n").count(), 5);
    }

    #[test]
    fn guesses_audio_content_types() {
        assert_eq!(content_type_for("note.WAV"), "audio/wav");
        assert_eq!(content_type_for("note.webm"), "audio/webm");
        assert_eq!(content_type_for("note"), "application/octet-stream");
    }

    #[test]
    fn extracts_trimmed_text() {
        let payload = serde_json::json!({ "text": " turn on the kitchen light " });
        assert_eq!(extract_text(&payload).unwrap(), "turn on the kitchen light");

        let payload = serde_json::json!({ "segments": [] });
        assert!(matches!(
            extract_text(&payload),
            Err(TranscriptionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn endpoint_path_is_normalized() {
        let settings = SttSettings {
            endpoint: "http://localhost:9000/".into(),
            ..SttSettings::default()
        };
        let transcriber = HttpTranscriber::new(&settings);
        assert_eq!(transcriber.url, "http://localhost:9000/v1/audio/transcriptions");
    }
}
