use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Encodes an icon blob as a data URI string.
/// Returns None when the image format cannot be recognized.
///
/// Icons come out of mod archives as raw bytes, so the MIME type is sniffed
/// from the magic header instead of a file extension.
pub fn to_data_uri(icon_bytes: &[u8]) -> Option<String> {
    let mime_type = sniff_mime(icon_bytes)?;
    let base64_data = BASE64.encode(icon_bytes);
    Some(format!("data:{};base64,{}", mime_type, base64_data))
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"<svg") || bytes.starts_with(b"<?xml") {
        Some("image/svg+xml")
    } else {
        None
    }
}
