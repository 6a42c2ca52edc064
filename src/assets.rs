//! Uploaded asset management.
//!
//! Uploads live in the site project's public uploads directory and are
//! addressed by site-relative routes (`/uploads/<file>`). The studio
//! copies files in and hands back routes; it never rewrites or renames
//! what is already there.

use crate::config::StudioConfig;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// File extensions rendered inline by markdown.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Routes of all uploaded files, sorted by name.
pub fn list_uploads(config: &StudioConfig) -> Vec<String> {
    list_routes(&config.content.uploads, "/uploads", None)
}

/// Routes of uploaded PDFs only, for attachment pickers.
pub fn list_pdfs(config: &StudioConfig) -> Vec<String> {
    list_routes(&config.content.uploads, "/uploads", Some("pdf"))
}

/// Site-relative paths of authored markdown post files, sorted by name.
pub fn list_post_files(config: &StudioConfig) -> Vec<String> {
    list_routes(&config.content.posts, "posts", Some("md"))
}

fn list_routes(dir: &Path, prefix: &str, extension: Option<&str>) -> Vec<String> {
    let mut routes: Vec<String> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            extension.is_none_or(|ext| {
                entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            })
        })
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| format!("{prefix}/{name}"))
        })
        .collect();
    routes.sort();
    routes
}

/// Copy `file` into the uploads directory and return its route.
///
/// An existing upload with the same name is replaced.
pub fn import_upload(config: &StudioConfig, file: &Path) -> Result<String> {
    if !file.is_file() {
        bail!("`{}` is not a file", file.display());
    }
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("`{}` has no usable file name", file.display()))?;

    let uploads = &config.content.uploads;
    fs::create_dir_all(uploads)
        .with_context(|| format!("Failed to create {}", uploads.display()))?;

    let target = uploads.join(name);
    fs::copy(file, &target)
        .with_context(|| format!("Failed to copy into {}", target.display()))?;

    Ok(format!("/uploads/{name}"))
}

/// Markdown snippet referencing an uploaded route: an image embed for
/// image extensions, a plain link otherwise.
pub fn markdown_link(route: &str) -> String {
    let name = route.rsplit('/').next().unwrap_or(route);
    let is_image = route
        .rsplit('.')
        .next()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

    if is_image {
        format!("![{name}]({route})")
    } else {
        format!("[{name}]({route})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudioConfig;
    use tempfile::tempdir;

    fn config_rooted(dir: &Path) -> StudioConfig {
        let mut config = StudioConfig::default();
        config.content.uploads = dir.join("public/uploads");
        config.content.posts = dir.join("posts");
        config
    }

    #[test]
    fn test_list_uploads_sorted_routes() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        fs::create_dir_all(&config.content.uploads).unwrap();
        fs::write(config.content.uploads.join("b.png"), b"x").unwrap();
        fs::write(config.content.uploads.join("a.pdf"), b"x").unwrap();

        assert_eq!(
            list_uploads(&config),
            vec!["/uploads/a.pdf", "/uploads/b.png"]
        );
    }

    #[test]
    fn test_list_pdfs_filters_extension() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        fs::create_dir_all(&config.content.uploads).unwrap();
        fs::write(config.content.uploads.join("img.png"), b"x").unwrap();
        fs::write(config.content.uploads.join("paper.PDF"), b"x").unwrap();

        assert_eq!(list_pdfs(&config), vec!["/uploads/paper.PDF"]);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        assert!(list_uploads(&config).is_empty());
        assert!(list_post_files(&config).is_empty());
    }

    #[test]
    fn test_list_post_files() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        fs::create_dir_all(&config.content.posts).unwrap();
        fs::write(config.content.posts.join("hello.md"), b"# hi").unwrap();
        fs::write(config.content.posts.join("notes.txt"), b"x").unwrap();

        assert_eq!(list_post_files(&config), vec!["posts/hello.md"]);
    }

    #[test]
    fn test_import_upload_copies_and_returns_route() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"jpeg bytes").unwrap();

        let route = import_upload(&config, &source).unwrap();

        assert_eq!(route, "/uploads/photo.jpg");
        let copied = config.content.uploads.join("photo.jpg");
        assert_eq!(fs::read(copied).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn test_import_upload_rejects_missing_file() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        assert!(import_upload(&config, &dir.path().join("nope.png")).is_err());
    }

    #[test]
    fn test_markdown_link_for_images_and_files() {
        assert_eq!(
            markdown_link("/uploads/photo.PNG"),
            "![photo.PNG](/uploads/photo.PNG)"
        );
        assert_eq!(
            markdown_link("/uploads/paper.pdf"),
            "[paper.pdf](/uploads/paper.pdf)"
        );
    }
}
