use models::TaskParams;

/// Parent of a server path, `None` when already at a root.
///
/// Both separators are accepted. A drive-letter parent comes back as `C:\`
/// and the parent of a top-level unix directory is `/`.
pub fn parent_dir(path: &str) -> Option<String> {
    let normalized = path.replace('\\', "/");
    let mut parts: Vec<&str> = normalized.trim_end_matches('/').split('/').collect();
    if parts.len() <= 1 {
        return None;
    }
    parts.pop();
    let parent = parts.join("/");

    if is_drive(&parent) {
        return Some(format!("{parent}\\"));
    }
    if parent.is_empty() {
        return Some("/".to_owned());
    }
    Some(parent)
}

fn is_drive(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Last segment after either separator.
pub fn file_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Drops the last extension, if there is a non-empty one.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}

/// Where a single-file submission writes: `<dir>/<name>`, or
/// `<dir>/<stem>_remuxed.<ext>` for remux.
pub fn output_path(output_dir: &str, input_path: &str, params: &TaskParams) -> String {
    let dir = output_dir.trim_end_matches(|c| c == '/' || c == '\\');
    let name = file_name(input_path);
    match params {
        TaskParams::Remux(p) => {
            let ext = match p.output_extension.trim_start_matches('.') {
                "" => "mp4",
                ext => ext,
            };
            format!("{dir}/{}_remuxed.{ext}", strip_extension(name))
        }
        _ => format!("{dir}/{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{RemuxParameters, TrimParameters};

    #[test]
    fn parent_of_nested_path() {
        assert_eq!(parent_dir("/a/b/c").as_deref(), Some("/a/b"));
        assert_eq!(parent_dir("/a/b/c/").as_deref(), Some("/a/b"));
        assert_eq!(parent_dir(r"D:\media\shows").as_deref(), Some("D:/media"));
    }

    #[test]
    fn single_segment_has_no_parent() {
        assert_eq!(parent_dir("videos"), None);
        assert_eq!(parent_dir("/"), None);
        assert_eq!(parent_dir(""), None);
        assert_eq!(parent_dir(r"C:\"), None);
    }

    #[test]
    fn drive_root_keeps_backslash() {
        assert_eq!(parent_dir(r"C:\Users").as_deref(), Some(r"C:\"));
        assert_eq!(parent_dir("c:/tmp/").as_deref(), Some(r"c:\"));
    }

    #[test]
    fn top_level_goes_to_root() {
        assert_eq!(parent_dir("/srv").as_deref(), Some("/"));
    }

    #[test]
    fn names_and_extensions() {
        assert_eq!(file_name("/videos/clip.mkv"), "clip.mkv");
        assert_eq!(file_name(r"C:\videos\clip.mkv"), "clip.mkv");
        assert_eq!(file_name("clip.mkv"), "clip.mkv");
        assert_eq!(strip_extension("clip.final.mkv"), "clip.final");
        assert_eq!(strip_extension("clip"), "clip");
        assert_eq!(strip_extension("clip."), "clip.");
    }

    #[test]
    fn remux_output_is_renamed() {
        let params = TaskParams::Remux(RemuxParameters {
            output_extension: "mp4".to_owned(),
        });
        let out = output_path("./output", "/videos/clip.mkv", &params);
        assert_eq!(out, "./output/clip_remuxed.mp4");
        assert!(out.ends_with("clip_remuxed.mp4"));
    }

    #[test]
    fn remux_defaults_to_mp4() {
        let params = TaskParams::Remux(RemuxParameters {
            output_extension: String::new(),
        });
        assert_eq!(
            output_path("out/", r"C:\v\clip.flv", &params),
            "out/clip_remuxed.mp4"
        );
    }

    #[test]
    fn other_types_keep_the_name() {
        let params = TaskParams::Trim(TrimParameters {
            start_time: "00:00:00".to_owned(),
            duration: "00:05:00".to_owned(),
        });
        assert_eq!(
            output_path("./output", "/videos/clip.mkv", &params),
            "./output/clip.mkv"
        );
    }
}
