use super::types::ApiId;

/// Constructs the clickable web URL for a Travis build.
///
/// The JSON API is served from the `api.` subdomain, while build pages for
/// people live on the bare host.
///
/// # Arguments
///
/// * `tld` - Top-level domain of the Travis instance ("org" or "com")
/// * `owner` - Repository owner or organization
/// * `repo` - Repository name
/// * `id` - Build identifier as reported by the API
///
/// # Returns
///
/// Clickable URL to the build (e.g., <https://travis-ci.org/owner/repo/builds/123>)
pub fn build_url(tld: &str, owner: &str, repo: &str, id: &ApiId) -> String {
    format!("https://travis-ci.{tld}/{owner}/{repo}/builds/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let url = build_url("org", "test-owner", "test-repo", &ApiId::Number(123456));
        assert_eq!(url, "https://travis-ci.org/test-owner/test-repo/builds/123456");
    }

    #[test]
    fn test_build_url_com_instance() {
        let url = build_url("com", "acme", "widget", &ApiId::Text("789012".to_string()));
        assert_eq!(url, "https://travis-ci.com/acme/widget/builds/789012");
    }
}
