use maud::{html, Markup, Render};

use crate::route::file_extension;

/// Icon chosen from a file name.
pub struct FileIcon<'a> {
    pub file_name: &'a str,
}

/// Returns the glyph and CSS class for `file_name`.
pub fn icon_for(file_name: &str) -> (&'static str, &'static str) {
    let extension = file_extension(file_name).to_lowercase();

    let by_extension = match extension.as_str() {
        "json" | "json5" => Some(("🔧", "icon-json")),
        "yaml" | "yml" | "toml" | "properties" | "ini" | "conf" => Some(("⚙️", "icon-config")),
        "xml" => Some(("🏷️", "icon-xml")),
        "md" | "markdown" | "rst" | "txt" => Some(("📝", "icon-text")),
        "js" | "mjs" | "jsx" | "ts" | "tsx" | "java" | "kt" | "py" | "rs" | "go" | "sh" => {
            Some(("📜", "icon-code"))
        }
        "html" | "htm" | "css" => Some(("🌐", "icon-web")),
        "zip" | "rar" | "7z" | "tar" | "gz" => Some(("🗄️", "icon-archive")),
        _ => None,
    };
    if let Some(icon) = by_extension {
        return icon;
    }

    match mime_guess::from_path(file_name).first() {
        Some(mime) => match mime.type_().as_str() {
            "image" => ("🖼️", "icon-image"),
            "audio" => ("🎵", "icon-audio"),
            "video" => ("🎬", "icon-video"),
            "text" => ("📝", "icon-text"),
            _ => ("📄", "icon-file"),
        },
        None => ("📄", "icon-file"),
    }
}

impl Render for FileIcon<'_> {
    fn render(&self) -> Markup {
        let (glyph, class) = icon_for(self.file_name);
        html! {
            span class={"file-icon " (class)} aria-hidden="true" { (glyph) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(icon_for("settings.json").1, "icon-json");
        assert_eq!(icon_for("app.YAML").1, "icon-config");
        assert_eq!(icon_for("a.ts").1, "icon-code");
        assert_eq!(icon_for("README.md").1, "icon-text");
    }

    #[test]
    fn falls_back_to_mime_type() {
        assert_eq!(icon_for("logo.png").1, "icon-image");
        assert_eq!(icon_for("clip.mp4").1, "icon-video");
        assert_eq!(icon_for("data.csv").1, "icon-text");
    }

    #[test]
    fn unknown_names_get_default_icon() {
        assert_eq!(icon_for("Dockerfile").1, "icon-file");
        assert_eq!(icon_for("blob.unknownext").1, "icon-file");
    }

    #[test]
    fn renders_span() {
        let out = FileIcon { file_name: "a.json" }.render().into_string();
        assert_eq!(
            out,
            "<span class=\"file-icon icon-json\" aria-hidden=\"true\">🔧</span>"
        );
    }
}
