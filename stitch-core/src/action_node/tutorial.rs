//! Nodes used by the tutorial assistant.

use super::{ActionNode, ExpectedType};

pub const UNDERSTAND_REQUIREMENT: &str = "Understand Requirement";
pub const WRITE_DIRECTORY: &str = "Write Directory";
pub const WRITE_CONTENT: &str = "Write Content";

pub const LANGUAGE_KEY: &str = "Language";
pub const TOPIC_KEY: &str = "Topic";
pub const DIRECTORY_KEY: &str = "Directory";
pub const CONTENT_KEY: &str = "Content";

pub fn language() -> ActionNode {
    ActionNode::new(
        LANGUAGE_KEY,
        ExpectedType::Str,
        "Provide the language used in the project, typically matching the user's requirement language.",
        "en_us",
    )
}

pub fn topic() -> ActionNode {
    ActionNode::new(
        TOPIC_KEY,
        ExpectedType::Str,
        "Understand user's requirement and get the Topic user want to learn",
        "",
    )
}

pub fn directory() -> ActionNode {
    ActionNode::new(
        DIRECTORY_KEY,
        ExpectedType::Str,
        r#"
        Analyze the topic and think what is the reader want to learn from the tutorial based on this topic.
        Then generate the subdirectories based on this topic.
        "#,
        r#"
        [subdirectory1, subdirectory2, subdirectory3]
        "#,
    )
}

pub fn content() -> ActionNode {
    ActionNode::new(
        CONTENT_KEY,
        ExpectedType::Str,
        r#"
        Now I will give you the module directory titles for the topic.
        Please output the detailed principle content of this title in detail.
        If there are code examples, please provide them according to standard code specifications.
        Without a code example, it is not necessary.
        "#,
        r#"
        1. subdirectory1: xxxxx
        "#,
    )
}

pub fn understand_requirement() -> ActionNode {
    ActionNode::from_children(UNDERSTAND_REQUIREMENT, vec![language(), topic()])
}

pub fn write_directory() -> ActionNode {
    ActionNode::from_children(WRITE_DIRECTORY, vec![directory()])
}

pub fn write_content() -> ActionNode {
    ActionNode::from_children(WRITE_CONTENT, vec![content()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composites_carry_expected_leaves() {
        let keys = |node: &ActionNode| -> Vec<String> {
            node.leaves().iter().map(|l| l.key.clone()).collect()
        };
        assert_eq!(keys(&understand_requirement()), vec!["Language", "Topic"]);
        assert_eq!(keys(&write_directory()), vec!["Directory"]);
        assert_eq!(keys(&write_content()), vec!["Content"]);
    }

    #[test]
    fn directory_example_is_a_bracketed_list() {
        let prompt = write_directory().compile("ctx");
        assert!(prompt.contains("\"Directory\": \"[subdirectory1, subdirectory2, subdirectory3]\""));
        assert!(prompt.contains("- Directory: str  # Analyze the topic"));
    }
}
