//! The assembled tutorial and where it is written.

pub mod writer;

pub use writer::{TutorialWriter, sanitize_title};

use serde::{Deserialize, Serialize};

/// One directory entry and the content written for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub directory: Vec<String>,
    pub sections: Vec<Section>,
}

impl TutorialDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn push_section(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.sections.push(Section {
            title: title.into(),
            content: content.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// `# <title>` followed by each section's content
    pub fn to_markdown(&self) -> String {
        let mut markdown = format!("# {}\n", self.title);
        for section in &self.sections {
            markdown.push('\n');
            markdown.push_str(section.content.trim_end());
            markdown.push('\n');
        }
        markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_has_title_then_sections() {
        let mut doc = TutorialDocument::new("Git");
        doc.push_section("Intro", "## Intro\nGit tracks changes.\n\n");
        doc.push_section("Branching", "## Branching\nUse `git branch`.");
        assert_eq!(
            doc.to_markdown(),
            "# Git\n\n## Intro\nGit tracks changes.\n\n## Branching\nUse `git branch`.\n"
        );
    }

    #[test]
    fn empty_document_renders_only_the_title() {
        let doc = TutorialDocument::new("Git");
        assert!(doc.is_empty());
        assert_eq!(doc.to_markdown(), "# Git\n");
    }
}
