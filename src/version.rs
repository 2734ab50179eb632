//! Resolution of the Tailwind CSS version to run.

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::release::Releases;
use crate::Result;

#[derive(Debug, Clone, Deserialize)]
struct Tag {
    name: String,
}

/// Returns the version of Tailwind CSS we should be running.
///
/// If a version override is provided, it is returned as-is without contacting the network.
/// Otherwise, the name of the most recent tag of the Tailwind CSS repository is returned.
#[instrument(level = "debug", skip(releases), ret(level = "debug"))]
pub async fn resolve_version(releases: &Releases, version_override: Option<&str>) -> Result<String> {
    if let Some(version) = version_override {
        return Ok(version.into());
    }

    latest_version(releases)
        .await
        .with_context(|| "unable to get latest version")
}

async fn latest_version(releases: &Releases) -> Result<String> {
    let url = releases.tags_url();
    let body = releases
        .get_api(&url)
        .await?
        .bytes()
        .await
        .with_context(|| format!("failed to read response from {url}"))?;

    let tags: Vec<Tag> = serde_json::from_slice(&body)
        .with_context(|| format!("failed to parse tags returned by {url}"))?;
    debug!(tag_count = tags.len());

    tags.into_iter()
        .next()
        .map(|tag| tag.name)
        .ok_or_else(|| anyhow!("no tags found"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use test_log::test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Config;

    const TAGS_PATH: &str = "/repos/tailwindlabs/tailwindcss/tags";

    fn get_releases(mock_server: &MockServer) -> Releases {
        let mut config = Config::from_env();
        config.api_base_url = mock_server.uri();
        config.github_token = None;
        Releases::new(&config).unwrap()
    }

    async fn mount_tags(mock_server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(TAGS_PATH))
            .respond_with(response)
            .mount(mock_server)
            .await;
    }

    #[test(tokio::test)]
    async fn test_override_skips_network() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let version = resolve_version(&get_releases(&mock_server), Some("v3.4.1")).await;

        assert_matches!(version, Ok(version) if version == "v3.4.1");
    }

    #[test(tokio::test)]
    async fn test_latest_is_first_tag() {
        let mock_server = MockServer::start().await;
        mount_tags(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(json!([{ "name": "v4.0.0" }, { "name": "v3.9.0" }])),
        )
        .await;

        let version = resolve_version(&get_releases(&mock_server), None).await;

        assert_matches!(version, Ok(version) if version == "v4.0.0");
    }

    #[test(tokio::test)]
    async fn test_extra_fields_are_ignored() {
        let mock_server = MockServer::start().await;
        mount_tags(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(json!([
                { "name": "v4.1.3", "zipball_url": "https://example.com", "commit": { "sha": "abc" } }
            ])),
        )
        .await;

        let version = resolve_version(&get_releases(&mock_server), None).await;

        assert_matches!(version, Ok(version) if version == "v4.1.3");
    }

    #[test(tokio::test)]
    async fn test_bad_status() {
        let mock_server = MockServer::start().await;
        mount_tags(&mock_server, ResponseTemplate::new(500)).await;

        let version = resolve_version(&get_releases(&mock_server), None).await;

        assert_matches!(version, Err(err) => {
            assert_eq!("unable to get latest version", err.to_string());
            assert!(format!("{err:#}").contains("bad response code: 500"));
        });
    }

    #[test(tokio::test)]
    async fn test_malformed_body() {
        let mock_server = MockServer::start().await;
        mount_tags(&mock_server, ResponseTemplate::new(200).set_body_string("<html></html>")).await;

        let version = resolve_version(&get_releases(&mock_server), None).await;

        assert_matches!(version, Err(err) if format!("{err:#}").contains("failed to parse tags"));
    }

    #[test(tokio::test)]
    async fn test_no_tags() {
        let mock_server = MockServer::start().await;
        mount_tags(&mock_server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

        let version = resolve_version(&get_releases(&mock_server), None).await;

        assert_matches!(version, Err(err) if format!("{err:#}").contains("no tags found"));
    }

    #[test(tokio::test)]
    async fn test_github_token_is_sent() {
        use wiremock::matchers::bearer_token;

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TAGS_PATH))
            .and(bearer_token("secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "v4.0.0" }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = Config::from_env();
        config.api_base_url = mock_server.uri();
        config.github_token = Some("secret".into());
        let releases = Releases::new(&config).unwrap();

        assert_matches!(resolve_version(&releases, None).await, Ok(version) if version == "v4.0.0");
    }
}
