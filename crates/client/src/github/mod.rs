//! GitHub repository contents accessor.
//!
//! Resolves a fixed set of named contentauth repositories and fetches file
//! or directory listings through the shared fetch client. Inline file
//! payloads are base64-decoded; external download URLs are never followed
//! automatically, since the payload may be an unvetted binary.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use c2pa_docs_core::Error;
use serde::Deserialize;

use crate::fetch::FetchClient;

/// Accept header for the GitHub contents API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Production API base; tests point at a local mock instead.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Marker returned for items that carry only an external download URL.
pub const NOT_FETCHED_MARKER: &str = "(binary or remote file - not fetched)";

/// The known contentauth repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoKey {
    Spec,
    Rs,
    Python,
    Js,
}

impl RepoKey {
    pub const ALL: [RepoKey; 4] = [RepoKey::Spec, RepoKey::Rs, RepoKey::Python, RepoKey::Js];

    /// Parse a logical repository key. Fails before any network access.
    pub fn parse(key: &str) -> Result<Self, Error> {
        match key {
            "spec" => Ok(RepoKey::Spec),
            "rs" => Ok(RepoKey::Rs),
            "python" => Ok(RepoKey::Python),
            "js" => Ok(RepoKey::Js),
            other => Err(Error::UnknownRepo(other.to_string())),
        }
    }

    /// The logical key as callers spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoKey::Spec => "spec",
            RepoKey::Rs => "rs",
            RepoKey::Python => "python",
            RepoKey::Js => "js",
        }
    }

    /// `owner/name` coordinate on GitHub.
    pub fn coordinate(&self) -> &'static str {
        match self {
            RepoKey::Spec => "contentauth/c2pa-spec",
            RepoKey::Rs => "contentauth/c2pa-rs",
            RepoKey::Python => "contentauth/c2pa-python",
            RepoKey::Js => "contentauth/c2pa-js",
        }
    }
}

/// One item of a contents API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsItem {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// The contents API returns an array for directories, an object for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentsItem>),
    Single(Box<ContentsItem>),
}

/// Name and size of one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub size: Option<u64>,
}

/// Directory contents partitioned by entry type.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    pub files: Vec<EntryInfo>,
    pub dirs: Vec<EntryInfo>,
}

/// A decoded file payload.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub name: String,
    pub text: String,
}

/// A resolved repository path.
#[derive(Debug, Clone)]
pub enum RepoEntry {
    Directory(DirectoryListing),
    File(FileContent),
}

/// Contents URL for a repository path, with surrounding slashes trimmed.
pub fn contents_url(api_base: &str, repo: RepoKey, path: &str) -> String {
    format!(
        "{}/repos/{}/contents/{}",
        api_base.trim_end_matches('/'),
        repo.coordinate(),
        path.trim_matches('/')
    )
}

/// Fetch a repository path from the official GitHub API.
pub async fn contents(fetcher: &FetchClient, repo: RepoKey, path: &str) -> Result<RepoEntry, Error> {
    contents_at(fetcher, GITHUB_API_BASE, repo, path).await
}

/// Same as [`contents`], against a non-default API base.
pub async fn contents_at(
    fetcher: &FetchClient, api_base: &str, repo: RepoKey, path: &str,
) -> Result<RepoEntry, Error> {
    let url = contents_url(api_base, repo, path);
    let body = fetcher.get(&url, Some(GITHUB_ACCEPT)).await?;

    let parsed: ContentsResponse = serde_json::from_str(&body)
        .map_err(|e| Error::Transport(format!("malformed contents payload from {url}: {e}")))?;

    match parsed {
        ContentsResponse::Listing(items) => Ok(RepoEntry::Directory(partition(items))),
        ContentsResponse::Single(item) => {
            let text = decode_file(&item)?;
            Ok(RepoEntry::File(FileContent { name: item.name.clone(), text }))
        }
    }
}

fn partition(items: Vec<ContentsItem>) -> DirectoryListing {
    let mut listing = DirectoryListing::default();
    for item in items {
        let info = EntryInfo { name: item.name, size: item.size };
        match item.kind.as_str() {
            "file" => listing.files.push(info),
            "dir" => listing.dirs.push(info),
            _ => {}
        }
    }
    listing
}

/// Decode an inline file payload.
///
/// GitHub wraps base64 content across lines; the whitespace is stripped
/// before decoding.
pub fn decode_file(item: &ContentsItem) -> Result<String, Error> {
    if item.encoding.as_deref() == Some("base64")
        && let Some(content) = &item.content
    {
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| Error::Transport(format!("invalid base64 content for {}: {e}", item.name)))?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    if item.download_url.as_deref().is_some_and(|u| !u.is_empty()) {
        return Ok(NOT_FETCHED_MARKER.to_string());
    }

    Ok(item.content.clone().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchConfig;
    use httpmock::prelude::*;

    fn item(name: &str) -> ContentsItem {
        ContentsItem {
            name: name.to_string(),
            size: None,
            kind: "file".to_string(),
            encoding: None,
            content: None,
            download_url: None,
        }
    }

    #[test]
    fn test_repo_key_parse() {
        assert_eq!(RepoKey::parse("rs").unwrap(), RepoKey::Rs);
        assert_eq!(RepoKey::parse("spec").unwrap().coordinate(), "contentauth/c2pa-spec");
    }

    #[test]
    fn test_repo_key_unknown() {
        let result = RepoKey::parse("golang");
        assert!(matches!(result, Err(Error::UnknownRepo(key)) if key == "golang"));
    }

    #[test]
    fn test_contents_url_trims_slashes() {
        let url = contents_url(GITHUB_API_BASE, RepoKey::Rs, "/docs/release-notes.md/");
        assert_eq!(
            url,
            "https://api.github.com/repos/contentauth/c2pa-rs/contents/docs/release-notes.md"
        );
    }

    #[test]
    fn test_decode_file_base64() {
        let mut file = item("README.md");
        file.encoding = Some("base64".to_string());
        // "# c2pa\n" wrapped the way the API wraps long payloads
        file.content = Some("IyBj\nMnBh\nCg==".to_string());

        assert_eq!(decode_file(&file).unwrap(), "# c2pa\n");
    }

    #[test]
    fn test_decode_file_invalid_base64() {
        let mut file = item("README.md");
        file.encoding = Some("base64".to_string());
        file.content = Some("!!! not base64 !!!".to_string());

        assert!(matches!(decode_file(&file), Err(Error::Transport(_))));
    }

    #[test]
    fn test_decode_file_download_url_only() {
        let mut file = item("logo.png");
        file.download_url = Some("https://raw.githubusercontent.com/x/logo.png".to_string());

        assert_eq!(decode_file(&file).unwrap(), NOT_FETCHED_MARKER);
    }

    #[test]
    fn test_decode_file_literal_content() {
        let mut file = item("notes.txt");
        file.content = Some("plain text".to_string());

        assert_eq!(decode_file(&file).unwrap(), "plain text");
    }

    #[test]
    fn test_decode_file_empty() {
        assert_eq!(decode_file(&item("empty")).unwrap(), "");
    }

    fn test_client(server: &MockServer) -> FetchClient {
        FetchClient::new(FetchConfig { allowed_hosts: vec![server.host()], ..Default::default() }).unwrap()
    }

    #[tokio::test]
    async fn test_contents_directory() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/contentauth/c2pa-rs/contents/examples")
                    .header("accept", GITHUB_ACCEPT);
                then.status(200).body(
                    r#"[
                        {"name": "v2show.rs", "size": 1204, "type": "file"},
                        {"name": "fixtures", "type": "dir"},
                        {"name": "link", "type": "symlink"}
                    ]"#,
                );
            })
            .await;

        let fetcher = test_client(&server);
        let entry = contents_at(&fetcher, &server.base_url(), RepoKey::Rs, "examples")
            .await
            .unwrap();

        match entry {
            RepoEntry::Directory(listing) => {
                assert_eq!(listing.files.len(), 1);
                assert_eq!(listing.files[0].name, "v2show.rs");
                assert_eq!(listing.files[0].size, Some(1204));
                assert_eq!(listing.dirs.len(), 1);
                assert_eq!(listing.dirs[0].name, "fixtures");
            }
            RepoEntry::File(_) => panic!("array payload must classify as a directory"),
        }
    }

    #[tokio::test]
    async fn test_contents_file() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/contentauth/c2pa-python/contents/README.md");
                then.status(200).body(
                    r#"{"name": "README.md", "size": 7, "type": "file",
                        "encoding": "base64", "content": "IyBj\nMnBh\nCg=="}"#,
                );
            })
            .await;

        let fetcher = test_client(&server);
        let entry = contents_at(&fetcher, &server.base_url(), RepoKey::Python, "/README.md")
            .await
            .unwrap();

        match entry {
            RepoEntry::File(file) => {
                assert_eq!(file.name, "README.md");
                assert_eq!(file.text, "# c2pa\n");
            }
            RepoEntry::Directory(_) => panic!("object payload must classify as a file"),
        }
    }

    #[tokio::test]
    async fn test_unknown_repo_fails_before_network() {
        let result = RepoKey::parse("unknown");
        assert!(matches!(result, Err(Error::UnknownRepo(_))));
    }
}
