use std::collections::HashMap;

/// Revision requested when the route does not name one.
pub const HEAD_REVISION: &str = "head";

/// Parameters of the file content route, with empty defaults for anything missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub project_name: String,
    pub repo_name: String,
    pub revision: String,
    pub path: Vec<String>,
}

impl RouteParams {
    /// Reads the route parameters captured by the router.
    ///
    /// Missing or empty `projectName`/`repoName` become `""` and a missing or
    /// empty `revision` becomes [`HEAD_REVISION`]. The `path` capture is split
    /// into its non-empty segments.
    pub fn from_captures(captures: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            captures
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
        };

        let path = captures
            .get("path")
            .map(|p| {
                p.split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            project_name: non_empty("projectName").unwrap_or_default(),
            repo_name: non_empty("repoName").unwrap_or_default(),
            revision: non_empty("revision").unwrap_or_else(|| HEAD_REVISION.to_string()),
            path,
        }
    }

    /// The file path sent to the API: the path segments joined with `/`.
    pub fn file_path(&self) -> String {
        self.path.join("/")
    }
}

/// Display name of the file: the last non-empty segment of the URL path.
pub fn file_name_from_url_path(url_path: &str) -> String {
    let last = url_path
        .split('/')
        .filter(|v| !v.is_empty())
        .last()
        .unwrap_or("");
    urlencoding::decode(last).map_or_else(|_| last.to_string(), |s| s.into_owned())
}

/// Everything after the last `.`; a name without a dot is returned whole.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx + 1..],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captures(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn joins_path_segments_in_order() {
        let params = RouteParams::from_captures(&captures(&[
            ("projectName", "foo"),
            ("repoName", "bar"),
            ("revision", "3"),
            ("path", "conf/app/settings.json"),
        ]));
        assert_eq!(params.path, vec!["conf", "app", "settings.json"]);
        assert_eq!(params.file_path(), "conf/app/settings.json");
        assert_eq!(params.revision, "3");
    }

    #[test]
    fn drops_empty_segments() {
        let params = RouteParams::from_captures(&captures(&[("path", "/src//a.ts/")]));
        assert_eq!(params.file_path(), "src/a.ts");
    }

    #[test]
    fn missing_revision_defaults_to_head() {
        let params = RouteParams::from_captures(&captures(&[
            ("projectName", "foo"),
            ("repoName", "bar"),
            ("path", "a.json"),
        ]));
        assert_eq!(params.revision, HEAD_REVISION);

        let params = RouteParams::from_captures(&captures(&[("revision", "")]));
        assert_eq!(params.revision, HEAD_REVISION);
    }

    #[test]
    fn missing_names_default_to_empty() {
        let params = RouteParams::from_captures(&HashMap::new());
        assert_eq!(params.project_name, "");
        assert_eq!(params.repo_name, "");
        assert!(params.path.is_empty());
        assert_eq!(params.file_path(), "");
    }

    #[test]
    fn file_name_is_last_url_segment() {
        assert_eq!(
            file_name_from_url_path("/app/projects/p/repos/r/files/head/src/a.ts"),
            "a.ts"
        );
        assert_eq!(file_name_from_url_path("/a/b/c.json/"), "c.json");
        assert_eq!(file_name_from_url_path("/a/my%20file.yaml"), "my file.yaml");
        assert_eq!(file_name_from_url_path("/"), "");
    }

    #[test]
    fn extension_after_last_dot() {
        let params = RouteParams::from_captures(&captures(&[("path", "src/a.ts")]));
        let name = params.path.last().map(String::as_str).unwrap_or("");
        assert_eq!(file_extension(name), "ts");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("Dockerfile"), "Dockerfile");
        assert_eq!(file_extension(".env"), "env");
    }
}
