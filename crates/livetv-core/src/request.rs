//! Playback request construction

use crate::{Error, ProtocolTag, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Schemes that address a remote server and therefore need a host
const NETWORK_SCHEMES: [&str; 4] = ["http", "https", "rtsp", "rtmp"];

/// Immutable media item handed to the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    uri: Url,
    /// Explicit protocol hint, `None` lets the engine probe the URI
    protocol: Option<ProtocolTag>,
}

impl PlaybackRequest {
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn protocol(&self) -> Option<ProtocolTag> {
        self.protocol
    }

    /// MIME type of the explicit hint, if any
    pub fn mime_type(&self) -> Option<&'static str> {
        self.protocol.and_then(|tag| tag.mime_type())
    }
}

/// Build a playback request for `url` with the resolved `tag`.
///
/// The hint is only set for a specified tag. The URL must be absolute and,
/// for network schemes, name a host.
pub fn build(url: &str, tag: ProtocolTag) -> Result<PlaybackRequest> {
    let trimmed = url.trim();
    let uri = Url::parse(trimmed).map_err(|e| Error::invalid_url(trimmed, e.to_string()))?;

    if uri.cannot_be_a_base() {
        return Err(Error::invalid_url(trimmed, "URI has no hierarchical part"));
    }
    if NETWORK_SCHEMES.contains(&uri.scheme()) && uri.host_str().map_or(true, str::is_empty) {
        return Err(Error::invalid_url(trimmed, "missing host"));
    }

    Ok(PlaybackRequest {
        uri,
        protocol: tag.is_specified().then_some(tag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_hint_set() {
        let request = build("https://cdn.example/live.m3u8?tok=1", ProtocolTag::Hls).unwrap();
        assert_eq!(request.protocol(), Some(ProtocolTag::Hls));
        assert_eq!(request.mime_type(), Some("application/x-mpegURL"));
        assert_eq!(request.uri().as_str(), "https://cdn.example/live.m3u8?tok=1");
    }

    #[test]
    fn test_unspecified_leaves_hint_empty() {
        let request = build("https://cdn.example/stream.unknownext", ProtocolTag::Unspecified).unwrap();
        assert_eq!(request.protocol(), None);
        assert_eq!(request.mime_type(), None);
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let request = build("  https://cdn.example/a.mpd \n", ProtocolTag::Dash).unwrap();
        assert_eq!(request.uri().path(), "/a.mpd");
    }

    #[test]
    fn test_local_file_accepted() {
        let request = build("file:///sdcard/movies/clip.mp4", ProtocolTag::Unspecified).unwrap();
        assert_eq!(request.uri().scheme(), "file");
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = build("videos/live.m3u8", ProtocolTag::Hls).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_opaque_uri_rejected() {
        let err = build("mailto:tv@example.com", ProtocolTag::Unspecified).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_network_scheme_without_host_rejected() {
        assert!(build("http://", ProtocolTag::Unspecified).is_err());
        assert!(build("rtsp:///stream", ProtocolTag::Unspecified).is_err());
    }
}
