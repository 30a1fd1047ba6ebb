//! Input resolution: turn a user-supplied path or URL into Markdown text.
//!
//! Local files are read with tokio's fs API; URLs are downloaded with a
//! bounded timeout. Either way the bytes must be valid UTF-8. A lossy decode
//! would silently plant replacement characters in the report, so invalid
//! input is rejected with the offset of the first bad byte.

use crate::error::Md2PdfError;
use std::path::PathBuf;
use tracing::{debug, info};

/// Markdown text together with where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    /// The input string as given by the caller.
    pub source: String,
    /// Local path, when the input was a file.
    pub local_path: Option<PathBuf>,
    /// The decoded document.
    pub markdown: String,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to Markdown text.
///
/// If the input is a URL, download it. Otherwise read the local file.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedInput, Md2PdfError> {
    if input.trim().is_empty() {
        return Err(Md2PdfError::InvalidInput {
            input: input.to_string(),
        });
    }
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        read_local(input).await
    }
}

async fn read_local(path_str: &str) -> Result<ResolvedInput, Md2PdfError> {
    let path = PathBuf::from(path_str);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Md2PdfError::PermissionDenied { path });
        }
        Err(_) => return Err(Md2PdfError::FileNotFound { path }),
    };

    let markdown = decode(path_str, bytes)?;
    debug!("Read {} bytes from {}", markdown.len(), path.display());

    Ok(ResolvedInput {
        source: path_str.to_string(),
        local_path: Some(path),
        markdown,
    })
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedInput, Md2PdfError> {
    info!("Downloading Markdown from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Md2PdfError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Md2PdfError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Md2PdfError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(Md2PdfError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Md2PdfError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let markdown = decode(url, bytes.to_vec())?;
    info!("Downloaded {} bytes", markdown.len());

    Ok(ResolvedInput {
        source: url.to_string(),
        local_path: None,
        markdown,
    })
}

fn decode(source: &str, bytes: Vec<u8>) -> Result<String, Md2PdfError> {
    String::from_utf8(bytes).map_err(|e| Md2PdfError::NotUtf8 {
        input: source.to_string(),
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Last non-empty path segment of a URL, if any.
pub fn url_file_stem(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let last = parsed.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    let stem = match last.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => last,
    };
    Some(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/notes.md"));
        assert!(is_url("http://example.com/notes.md"));
        assert!(!is_url("/tmp/notes.md"));
        assert!(!is_url("notes.md"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_url_file_stem() {
        assert_eq!(
            url_file_stem("https://example.com/docs/PRODUCT_SPEC.md").as_deref(),
            Some("PRODUCT_SPEC")
        );
        assert_eq!(
            url_file_stem("https://example.com/raw/readme/").as_deref(),
            Some("readme")
        );
        assert_eq!(url_file_stem("https://example.com/"), None);
    }

    #[tokio::test]
    async fn test_read_local_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "# Title\n\nBody").unwrap();
        let path = f.path().to_str().unwrap().to_string();

        let resolved = resolve_input(&path, 5).await.unwrap();
        assert_eq!(resolved.markdown, "# Title\n\nBody");
        assert_eq!(resolved.local_path.as_deref(), Some(f.path()));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = resolve_input("/definitely/not/here.md", 5).await.unwrap_err();
        assert!(matches!(err, Md2PdfError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_blank_input_rejected() {
        let err = resolve_input("   ", 5).await.unwrap_err();
        assert!(matches!(err, Md2PdfError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"ok\xff\xfe").unwrap();
        let path = f.path().to_str().unwrap().to_string();

        match resolve_input(&path, 5).await.unwrap_err() {
            Md2PdfError::NotUtf8 { offset, .. } => assert_eq!(offset, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
