//! Content-type resolution for media URLs
//!
//! Two tiers: explicit manifest extensions anywhere in the URL text win, in a
//! fixed order (`.m3u8`, `.mpd`, `.ism`). Only when none is present does the
//! structural inference look at the parsed path and query.

use crate::ProtocolTag;
use tracing::trace;
use url::Url;

/// Ordered explicit markers, first match wins
const EXPLICIT_MARKERS: [(&str, ProtocolTag); 3] = [
    (".m3u8", ProtocolTag::Hls),
    (".mpd", ProtocolTag::Dash),
    (".ism", ProtocolTag::SmoothStreaming),
];

/// Resolve the protocol hint for a URL.
///
/// Total and deterministic: malformed input degrades to
/// [`ProtocolTag::Unspecified`].
///
/// Markers are unanchored substrings of the whole URL, so a URL that merely
/// mentions `.m3u8` (a path segment, a query value) is classified as HLS even
/// when the stream is something else. Known heuristic limitation, kept as is.
pub fn resolve(url: &str) -> ProtocolTag {
    let text = url.to_lowercase();

    // Rule order breaks ties, not position in the string
    for (marker, tag) in EXPLICIT_MARKERS {
        if text.contains(marker) {
            trace!(url, marker, protocol = %tag, "Explicit marker matched");
            return tag;
        }
    }

    infer_content_type(url)
}

/// Infer the protocol from URI structure.
///
/// Path extension first (`.mpd`, `.m3u8`/`.m3u`, Smooth Streaming manifest
/// forms), then a `format` query parameter. Progressive files and anything
/// unparseable are [`ProtocolTag::Unspecified`].
pub fn infer_content_type(url: &str) -> ProtocolTag {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return ProtocolTag::Unspecified;
    };

    let path = parsed.path().to_ascii_lowercase();
    if path.ends_with(".mpd") {
        return ProtocolTag::Dash;
    }
    if path.ends_with(".m3u8") || path.ends_with(".m3u") {
        return ProtocolTag::Hls;
    }
    if let Some(tag) = smooth_streaming_path(&path) {
        return tag;
    }

    format_parameter(&parsed).unwrap_or(ProtocolTag::Unspecified)
}

/// Matches `.ism`, `.isml`, optionally `/manifest`, optionally `(format=...)`
fn smooth_streaming_path(path: &str) -> Option<ProtocolTag> {
    let start = path.rfind(".ism")?;
    let rest = &path[start + ".ism".len()..];
    let rest = rest.strip_prefix('l').unwrap_or(rest);
    if rest.is_empty() {
        return Some(ProtocolTag::SmoothStreaming);
    }

    let rest = rest.strip_prefix("/manifest")?;
    if rest.is_empty() {
        return Some(ProtocolTag::SmoothStreaming);
    }

    let format = rest.strip_prefix('(')?.strip_suffix(')')?;
    let tag = if format.contains("format=mpd-time-csf") {
        ProtocolTag::Dash
    } else if format.contains("format=m3u8-aapl") {
        ProtocolTag::Hls
    } else {
        ProtocolTag::SmoothStreaming
    };
    Some(tag)
}

fn format_parameter(url: &Url) -> Option<ProtocolTag> {
    let (_, value) = url
        .query_pairs()
        .find(|(key, _)| key.eq_ignore_ascii_case("format"))?;

    match value.to_ascii_lowercase().as_str() {
        "m3u8" | "m3u8-aapl" | "hls" => Some(ProtocolTag::Hls),
        "mpd" | "mpd-time-csf" | "dash" => Some(ProtocolTag::Dash),
        "ss" | "smooth" => Some(ProtocolTag::SmoothStreaming),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://cdn.example/live.m3u8")]
    #[case("https://cdn.example/live.m3u8?tok=1")]
    #[case("https://cdn.example/play?src=stream.m3u8")]
    #[case("https://cdn.example/master.m3u8/index.mpd")]
    #[case("https://cdn.example/manifest.mpd?fallback=alt.m3u8")]
    #[case("https://cdn.example/video.ism/manifest(format=m3u8-aapl).m3u8")]
    fn test_m3u8_always_hls(#[case] url: &str) {
        assert_eq!(resolve(url), ProtocolTag::Hls);
    }

    #[rstest]
    #[case("https://cdn.example/manifest.mpd")]
    #[case("https://cdn.example/manifest.mpd?token=abc")]
    #[case("https://cdn.example/video.ism/manifest.mpd")]
    fn test_mpd_without_m3u8_is_dash(#[case] url: &str) {
        assert_eq!(resolve(url), ProtocolTag::Dash);
    }

    #[rstest]
    #[case("https://cdn.example/video.ism/manifest")]
    #[case("https://cdn.example/video.isml/manifest")]
    #[case("https://cdn.example/video.ism")]
    #[case("https://cdn.example/video.ism/manifest(format=mpd-time-csf)")]
    fn test_ism_is_smooth_streaming(#[case] url: &str) {
        assert_eq!(resolve(url), ProtocolTag::SmoothStreaming);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("HTTP://X/Y.M3U8"), resolve("http://x/y.m3u8"));
        assert_eq!(resolve("HTTP://X/Y.M3U8"), ProtocolTag::Hls);
        assert_eq!(resolve("https://CDN.example/Manifest.MPD"), ProtocolTag::Dash);
        assert_eq!(resolve("https://cdn.example/Video.ISM/Manifest"), ProtocolTag::SmoothStreaming);
    }

    #[rstest]
    #[case("https://cdn.example/stream.unknownext")]
    #[case("https://cdn.example/movie.mp4")]
    #[case("rtsp://camera.local/stream")]
    #[case("not a url at all")]
    #[case("")]
    #[case("://")]
    fn test_unresolvable_is_unspecified(#[case] url: &str) {
        assert_eq!(resolve(url), ProtocolTag::Unspecified);
    }

    #[rstest]
    #[case("https://cdn.example/channel.m3u", ProtocolTag::Hls)]
    #[case("https://cdn.example/play?format=m3u8-aapl", ProtocolTag::Hls)]
    #[case("https://cdn.example/play?FORMAT=DASH", ProtocolTag::Dash)]
    #[case("https://cdn.example/play?id=9&format=smooth", ProtocolTag::SmoothStreaming)]
    #[case("https://cdn.example/play?format=mp4", ProtocolTag::Unspecified)]
    fn test_structural_fallback(#[case] url: &str, #[case] expected: ProtocolTag) {
        assert_eq!(resolve(url), expected);
    }

    #[rstest]
    #[case("https://cdn.example/a/manifest.mpd", ProtocolTag::Dash)]
    #[case("https://cdn.example/a/index.M3U8", ProtocolTag::Hls)]
    #[case("https://cdn.example/a.ism/manifest(format=mpd-time-csf)", ProtocolTag::Dash)]
    #[case("https://cdn.example/a.isml/manifest(format=m3u8-aapl)", ProtocolTag::Hls)]
    #[case("https://cdn.example/a.ism/manifest(filter=hd)", ProtocolTag::SmoothStreaming)]
    #[case("https://cdn.example/a.ism/thumbnails", ProtocolTag::Unspecified)]
    #[case("https://cdn.example/m3u8/file.ts", ProtocolTag::Unspecified)]
    fn test_infer_content_type(#[case] url: &str, #[case] expected: ProtocolTag) {
        assert_eq!(infer_content_type(url), expected);
    }

    #[test]
    fn test_unanchored_marker_limitation() {
        // A path segment mentioning the extension still wins
        let url = "https://cdn.example/guides/how-to-use.m3u8-files/video.mp4";
        assert_eq!(resolve(url), ProtocolTag::Hls);
        assert_eq!(infer_content_type(url), ProtocolTag::Unspecified);
    }
}
