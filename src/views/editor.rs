use maud::{html, Markup, PreEscaped, Render};

/// Editable view of one file, pre-filled with its content at `revision`.
pub struct FileEditor<'a> {
    pub project_name: &'a str,
    pub repo_name: &'a str,
    pub extension: &'a str,
    pub original_content: &'a str,
    pub path: &'a str,
    pub name: &'a str,
    pub revision: &'a str,
}

/// Editor language mode for a file extension.
pub fn language_for(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "json" | "json5" => "json",
        "yaml" | "yml" => "yaml",
        "js" | "mjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "md" | "markdown" => "markdown",
        "xml" => "xml",
        "toml" => "toml",
        "properties" => "properties",
        _ => "plaintext",
    }
}

impl Render for FileEditor<'_> {
    fn render(&self) -> Markup {
        let language = language_for(self.extension);
        let lines = self.original_content.lines().count();
        let rows = lines.clamp(10, 40);
        html! {
            section class="file-editor"
                data-project=(self.project_name)
                data-repo=(self.repo_name)
                data-path=(self.path)
                data-name=(self.name)
                data-revision=(self.revision)
                data-extension=(self.extension)
                data-language=(language) {
                div class="editor-toolbar" {
                    span class="editor-language" { (language) }
                    span class="editor-lines" { (lines) " lines" }
                }
                label class="visually-hidden" for="file-editor-content" { "Content of " (self.name) }
                // A newline right after <textarea> is dropped by the parser, so lead with one.
                textarea #file-editor-content name="content" spellcheck="false" rows=(rows) {
                    (PreEscaped("\n")) (self.original_content)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(content: &str) -> FileEditor<'_> {
        FileEditor {
            project_name: "foo",
            repo_name: "bar",
            extension: "ts",
            original_content: content,
            path: "/src/a.ts",
            name: "a.ts",
            revision: "head",
        }
    }

    #[test]
    fn carries_identifying_attributes() {
        let out = editor("x=1").render().into_string();
        assert!(out.contains("data-project=\"foo\""));
        assert!(out.contains("data-repo=\"bar\""));
        assert!(out.contains("data-path=\"/src/a.ts\""));
        assert!(out.contains("data-name=\"a.ts\""));
        assert!(out.contains("data-revision=\"head\""));
        assert!(out.contains("data-language=\"typescript\""));
        assert!(out.contains(">\nx=1</textarea>"));
    }

    #[test]
    fn escapes_content() {
        let out = editor("<script>alert(1)</script>").render().into_string();
        assert!(out.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn language_modes() {
        assert_eq!(language_for("JSON"), "json");
        assert_eq!(language_for("yml"), "yaml");
        assert_eq!(language_for("Dockerfile"), "plaintext");
    }
}
