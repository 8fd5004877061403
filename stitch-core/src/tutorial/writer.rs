use super::TutorialDocument;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

const FALLBACK_NAME: &str = "tutorial";
/// Longest file stem in chars; keeps multi-byte names well under the 255-byte limit
const MAX_NAME_CHARS: usize = 80;

/// Writes tutorials under `<root>/<timestamp>/<title>.md`
#[derive(Debug, Clone)]
pub struct TutorialWriter {
    root: PathBuf,
}

impl TutorialWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn write(&self, document: &TutorialDocument) -> Result<PathBuf> {
        self.write_at(document, Utc::now()).await
    }

    /// Write into the folder for `timestamp`, creating it as needed
    pub async fn write_at(
        &self,
        document: &TutorialDocument,
        timestamp: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let dir = self
            .root
            .join(timestamp.format("%Y%m%dT%H%M%SZ").to_string());
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let path = dir.join(format!("{}.md", sanitize_title(&document.title)));
        fs::write(&path, document.to_markdown())
            .await
            .with_context(|| format!("Failed to write tutorial: {}", path.display()))?;

        info!(path = %path.display(), sections = document.sections.len(), "tutorial saved");
        Ok(path)
    }
}

/// File-name-safe form of a tutorial title.
///
/// Letters and digits of any script are kept, as are `-` and `_`;
/// whitespace runs become a single `_`. The result is capped at
/// `MAX_NAME_CHARS` characters.
pub fn sanitize_title(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    let mut pending_space = false;
    let mut count = 0;
    for ch in title.trim().chars() {
        if count >= MAX_NAME_CHARS {
            break;
        }
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !(ch.is_alphanumeric() || ch == '-' || ch == '_') {
            continue;
        }
        if pending_space && !name.is_empty() {
            if count + 1 >= MAX_NAME_CHARS {
                break;
            }
            name.push('_');
            count += 1;
        }
        pending_space = false;
        name.push(ch);
        count += 1;
    }

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn titles_are_made_file_safe() {
        assert_eq!(sanitize_title("Git  Basics: a/b"), "Git_Basics_ab");
        assert_eq!(sanitize_title("Git 教程"), "Git_教程");
        assert_eq!(sanitize_title("  ../  "), "tutorial");
        assert_eq!(sanitize_title(""), "tutorial");
    }

    #[test]
    fn long_titles_are_capped_by_chars() {
        let title = "请帮我写一篇关于 Git 的教程".repeat(12);
        let name = sanitize_title(&title);
        assert_eq!(name.chars().count(), MAX_NAME_CHARS);
        assert!(name.len() < 255);
        assert!(name.starts_with("请帮我写一篇关于_Git_的教程"));
        assert!(!name.ends_with('_'));
    }

    #[tokio::test]
    async fn long_request_titles_still_write() {
        let tmp = TempDir::new().unwrap();
        let writer = TutorialWriter::new(tmp.path());
        let doc = TutorialDocument::new("请帮我写一篇关于 Git 的教程".repeat(12));

        let path = writer.write(&doc).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn writes_into_timestamped_folder() {
        let tmp = TempDir::new().unwrap();
        let writer = TutorialWriter::new(tmp.path().join("out"));
        let mut doc = TutorialDocument::new("Git Tutorial");
        doc.push_section("Intro", "Hello");
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        let path = writer.write_at(&doc, timestamp).await.unwrap();

        assert_eq!(
            path,
            tmp.path().join("out/20240501T123000Z/Git_Tutorial.md")
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Git Tutorial\n\nHello\n");
    }
}
