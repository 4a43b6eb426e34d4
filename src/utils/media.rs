pub const AUDIO_EXTENSIONS: &[&str] = &["mp3"];
pub const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const NEWS_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Returns the matching extension (lowercase, without dot) if `file_name`
/// ends with one of `allowed`.
pub fn allowed_extension(file_name: &str, allowed: &[&'static str]) -> Option<&'static str> {
    let lower = file_name.to_lowercase();
    allowed
        .iter()
        .copied()
        .find(|ext| lower.ends_with(&format!(".{}", ext)))
}

pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "mp3" => "audio/mpeg",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_requires_mp3_suffix() {
        assert_eq!(allowed_extension("track.MP3", AUDIO_EXTENSIONS), Some("mp3"));
        assert_eq!(allowed_extension("track.wav", AUDIO_EXTENSIONS), None);
        assert_eq!(allowed_extension("mp3", AUDIO_EXTENSIONS), None);
        assert_eq!(allowed_extension("track.mp3.exe", AUDIO_EXTENSIONS), None);
    }

    #[test]
    fn covers_accept_jpeg_and_png_only() {
        assert_eq!(allowed_extension("cover.JPEG", COVER_EXTENSIONS), Some("jpeg"));
        assert_eq!(allowed_extension("cover.png", COVER_EXTENSIONS), Some("png"));
        assert_eq!(allowed_extension("cover.webp", COVER_EXTENSIONS), None);
        assert_eq!(allowed_extension("cover.webp", NEWS_IMAGE_EXTENSIONS), Some("webp"));
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for("mp3"), "audio/mpeg");
        assert_eq!(content_type_for("jpg"), "image/jpeg");
        assert_eq!(content_type_for("webp"), "image/webp");
    }
}
