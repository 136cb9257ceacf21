use maud::{html, Markup, Render};

/// Navigation trail built from a URL path.
///
/// Every non-empty segment becomes a crumb linking to the path up to that
/// segment, except the indices in `omit_index_list`. `suffixes` appends extra
/// path to the link of a given index. The last crumb is the current page and is
/// not linked.
pub struct Breadcrumbs<'a> {
    pub path: &'a str,
    pub omit_index_list: &'a [usize],
    pub suffixes: &'a [(usize, &'a str)],
}

#[derive(Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

impl Breadcrumbs<'_> {
    pub fn crumbs(&self) -> Vec<Crumb> {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();

        let mut crumbs: Vec<Crumb> = segments
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.omit_index_list.contains(i))
            .map(|(i, segment)| {
                let suffix = self
                    .suffixes
                    .iter()
                    .find(|(idx, _)| *idx == i)
                    .map_or("", |(_, s)| *s);
                Crumb {
                    label: urlencoding::decode(segment)
                        .map_or_else(|_| segment.to_string(), |s| s.into_owned()),
                    href: Some(format!("/{}{}", segments[..=i].join("/"), suffix)),
                }
            })
            .collect();

        if let Some(last) = crumbs.last_mut() {
            last.href = None;
        }
        crumbs
    }
}

impl Render for Breadcrumbs<'_> {
    fn render(&self) -> Markup {
        let crumbs = self.crumbs();
        html! {
            nav class="breadcrumbs" aria-label="breadcrumb" {
                ol {
                    @for (i, crumb) in crumbs.iter().enumerate() {
                        @if i > 0 {
                            li class="breadcrumb-separator" aria-hidden="true" { "/" }
                        }
                        li class="breadcrumb-item" {
                            @match &crumb.href {
                                Some(href) => {
                                    a href=(href) { (crumb.label) }
                                }
                                None => {
                                    span aria-current="page" { (crumb.label) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "/app/projects/foo/repos/bar/files/head/src/a.ts";

    fn page_crumbs() -> Breadcrumbs<'static> {
        Breadcrumbs {
            path: PAGE,
            omit_index_list: &[0, 3, 5, 6],
            suffixes: &[(4, "/tree/head")],
        }
    }

    #[test]
    fn omits_and_suffixes() {
        let crumbs = page_crumbs().crumbs();
        let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["projects", "foo", "bar", "src", "a.ts"]);

        assert_eq!(crumbs[0].href.as_deref(), Some("/app/projects"));
        assert_eq!(crumbs[1].href.as_deref(), Some("/app/projects/foo"));
        assert_eq!(
            crumbs[2].href.as_deref(),
            Some("/app/projects/foo/repos/bar/tree/head")
        );
        assert_eq!(
            crumbs[3].href.as_deref(),
            Some("/app/projects/foo/repos/bar/files/head/src")
        );
        assert_eq!(crumbs[4].href, None);
    }

    #[test]
    fn decodes_labels() {
        let crumbs = Breadcrumbs {
            path: "/dir/my%20file.json",
            omit_index_list: &[],
            suffixes: &[],
        }
        .crumbs();
        assert_eq!(crumbs[1].label, "my file.json");
        assert_eq!(crumbs[0].href.as_deref(), Some("/dir"));
    }

    #[test]
    fn renders_current_page_unlinked() {
        let out = page_crumbs().render().into_string();
        assert!(out.contains("<a href=\"/app/projects/foo/repos/bar/tree/head\">bar</a>"));
        assert!(out.contains("<span aria-current=\"page\">a.ts</span>"));
        assert_eq!(out.matches("breadcrumb-separator").count(), 4);
    }

    #[test]
    fn empty_path_renders_no_crumbs() {
        let crumbs = Breadcrumbs {
            path: "/",
            omit_index_list: &[],
            suffixes: &[],
        }
        .crumbs();
        assert!(crumbs.is_empty());
    }
}
