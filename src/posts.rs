//! Blog post authoring.
//!
//! A post is two artifacts created together: a markdown body file in the
//! posts directory and a blog record whose `content` field points at it
//! by site-relative path.

use crate::config::StudioConfig;
use crate::document::DocumentStore;
use crate::editor::collection::fresh_id;
use anyhow::{Context, Result, bail};
use deunicode::deunicode;
use serde_json::json;
use std::{fs, path::Path};

/// Inputs for a new post. Everything except the title may be empty.
#[derive(Debug, Default, Clone)]
pub struct NewPost {
    pub title: String,
    /// Display date, e.g. "Apr 15, 2025". Empty means today.
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    /// Route of an attached pdf, e.g. "/uploads/paper.pdf".
    pub pdf_attachment: String,
    pub body: String,
}

/// Derive a markdown filename from a post title.
///
/// The title is transliterated to ASCII, lowercased, and every non
/// alphanumeric run collapses to a single `-`. A title with nothing
/// usable becomes `post.md`. When the name is already taken in
/// `posts_dir`, a timestamp suffix keeps old bodies from being clobbered.
pub fn post_filename(title: &str, posts_dir: &Path) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in deunicode(title).to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug = "post".to_string();
    }

    let name = format!("{slug}.md");
    if !posts_dir.join(&name).exists() {
        return name;
    }

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{slug}-{stamp}.md")
}

/// Write the body file and insert the blog record at the front.
///
/// Returns the site-relative content path of the new post.
pub fn create_post(
    store: &mut DocumentStore,
    config: &StudioConfig,
    post: &NewPost,
) -> Result<String> {
    let title = post.title.trim();
    if title.is_empty() {
        bail!("post title must not be empty");
    }

    let posts_dir = &config.content.posts;
    fs::create_dir_all(posts_dir)
        .with_context(|| format!("Failed to create {}", posts_dir.display()))?;

    let name = post_filename(title, posts_dir);
    let file = posts_dir.join(&name);
    fs::write(&file, &post.body)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    let date = if post.date.trim().is_empty() {
        chrono::Local::now().format("%b %-d, %Y").to_string()
    } else {
        post.date.trim().to_string()
    };

    let content = format!("posts/{name}");
    let posts = store.list_mut("blog_posts");
    let id = fresh_id(posts.iter());
    posts.insert(
        0,
        json!({
            "id": id,
            "title": title,
            "date": date,
            "excerpt": post.excerpt,
            "content": content,
            "tags": post.tags,
            "pdfAttachment": post.pdf_attachment,
        }),
    );

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn config_rooted(dir: &Path) -> StudioConfig {
        let mut config = StudioConfig::default();
        config.content.posts = dir.join("posts");
        config
    }

    #[test]
    fn test_post_filename_basic() {
        let dir = tempdir().unwrap();
        assert_eq!(post_filename("Hello World", dir.path()), "hello-world.md");
    }

    #[test]
    fn test_post_filename_collapses_punctuation() {
        let dir = tempdir().unwrap();
        assert_eq!(
            post_filename("  Notes: on GKP codes!  ", dir.path()),
            "notes-on-gkp-codes.md"
        );
    }

    #[test]
    fn test_post_filename_transliterates() {
        let dir = tempdir().unwrap();
        assert_eq!(post_filename("Café Déjà Vu", dir.path()), "cafe-deja-vu.md");
    }

    #[test]
    fn test_post_filename_fallback() {
        let dir = tempdir().unwrap();
        assert_eq!(post_filename("???", dir.path()), "post.md");
        assert_eq!(post_filename("", dir.path()), "post.md");
    }

    #[test]
    fn test_post_filename_collision_gets_suffix() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hello.md"), b"x").unwrap();

        let name = post_filename("Hello", dir.path());
        assert_ne!(name, "hello.md");
        assert!(name.starts_with("hello-"));
        assert!(name.ends_with(".md"));
    }

    #[test]
    fn test_create_post_writes_file_and_record() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        let mut store = DocumentStore::empty();

        let post = NewPost {
            title: "My First Post".into(),
            date: "Apr 15, 2025".into(),
            excerpt: "short".into(),
            tags: vec!["Math".into()],
            pdf_attachment: "/uploads/paper.pdf".into(),
            body: "# hi\n".into(),
        };
        let content = create_post(&mut store, &config, &post).unwrap();

        assert_eq!(content, "posts/my-first-post.md");
        let body = fs::read_to_string(config.content.posts.join("my-first-post.md")).unwrap();
        assert_eq!(body, "# hi\n");

        let record = store.record("blog_posts.0").unwrap();
        assert_eq!(record.get("title").unwrap(), "My First Post");
        assert_eq!(record.get("date").unwrap(), "Apr 15, 2025");
        assert_eq!(record.get("content").unwrap(), "posts/my-first-post.md");
        assert_eq!(record.get("tags").unwrap(), &json!(["Math"]));
        assert_eq!(record.get("pdfAttachment").unwrap(), "/uploads/paper.pdf");
        assert!(!record.get("id").unwrap().as_str().unwrap().is_empty());
    }

    #[test]
    fn test_create_post_inserts_at_front() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        let mut store =
            DocumentStore::from_value(json!({"blog_posts": [{"id": "old", "title": "Old"}]}))
                .unwrap();

        let post = NewPost {
            title: "Newer".into(),
            ..Default::default()
        };
        create_post(&mut store, &config, &post).unwrap();

        let posts = store.list("blog_posts").unwrap();
        assert_eq!(posts[0]["title"], "Newer");
        assert_eq!(posts[1]["id"], "old");
    }

    #[test]
    fn test_create_post_empty_title_is_rejected() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        let mut store = DocumentStore::empty();

        let post = NewPost {
            title: "   ".into(),
            ..Default::default()
        };
        assert!(create_post(&mut store, &config, &post).is_err());
        assert!(store.list("blog_posts").is_none());
    }

    #[test]
    fn test_create_post_defaults_date_to_today() {
        let dir = tempdir().unwrap();
        let config = config_rooted(dir.path());
        let mut store = DocumentStore::empty();

        let post = NewPost {
            title: "Dated".into(),
            ..Default::default()
        };
        create_post(&mut store, &config, &post).unwrap();

        let date = store.get("blog_posts.0.date").unwrap().as_str().unwrap();
        let year = chrono::Local::now().format("%Y").to_string();
        assert!(date.ends_with(&year));
    }
}
