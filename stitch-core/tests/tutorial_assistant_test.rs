mod common;

use common::{ScriptedProvider, content_reply};
use stitch_core::action_node::FillOptions;
use stitch_core::roles::{RoleProfile, TutorialAssistant};
use stitch_core::schema::ActionKind;

fn assistant(provider: &ScriptedProvider) -> TutorialAssistant {
    TutorialAssistant::new(
        RoleProfile::default(),
        provider.boxed(),
        FillOptions::new("scripted-model"),
    )
}

fn git_script() -> ScriptedProvider {
    ScriptedProvider::new([
        content_reply(r#"{"Language": "en_us", "Topic": "Git"}"#),
        content_reply(r#"{"Directory": "[Introduction, Branching]"}"#),
        content_reply(r###"{"Content": "## Introduction\nGit is a VCS."}"###),
        content_reply(r###"{"Content": "## Branching\n`git branch feature`"}"###),
    ])
}

#[tokio::test]
async fn run_writes_one_section_per_directory_entry() {
    let provider = git_script();
    let mut role = assistant(&provider);

    let report = role.run("Write a tutorial about Git").await.unwrap();

    let doc = &report.document;
    assert_eq!(doc.title, "Git");
    assert_eq!(doc.language.as_deref(), Some("en_us"));
    assert_eq!(doc.directory, vec!["Introduction", "Branching"]);
    let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "Branching"]);
    assert_eq!(
        doc.to_markdown(),
        "# Git\n\n## Introduction\nGit is a VCS.\n\n## Branching\n`git branch feature`\n"
    );

    // understand + directory + two sections, each run exactly once
    assert_eq!(provider.requests().len(), 4);
    let last = report.message.unwrap();
    assert_eq!(last.cause_by, ActionKind::WriteContent);
    assert_eq!(last.role, "Tutorial Assistant");
    assert_eq!(last.sent_from.as_deref(), Some("Stitch"));
}

#[tokio::test]
async fn memory_records_every_step_in_order() {
    let provider = git_script();
    let mut role = assistant(&provider);
    role.run("Write a tutorial about Git").await.unwrap();

    let causes: Vec<ActionKind> = role.memory().history().iter().map(|m| m.cause_by).collect();
    assert_eq!(
        causes,
        vec![
            ActionKind::UserRequirement,
            ActionKind::UnderstandRequirement,
            ActionKind::WriteDirectory,
            ActionKind::WriteContent,
            ActionKind::WriteContent,
        ]
    );
    assert!(role.context().todo().is_none());
}

#[tokio::test]
async fn content_prompts_carry_history_and_section_title() {
    let provider = git_script();
    let mut role = assistant(&provider);
    role.run("Write a tutorial about Git").await.unwrap();

    let prompts = provider.prompts();
    assert!(prompts[0].contains("## History Messages\n0: user: Write a tutorial about Git"));
    assert!(prompts[0].contains("- Language: str"));
    assert!(prompts[0].contains("- Topic: str"));
    assert!(prompts[1].contains("- Directory: str"));

    let branching = &prompts[3];
    assert!(branching.contains("- Content: str"));
    assert!(branching.contains("Branching\n\n-----"));
    // newest message first: the introduction section just written
    assert!(branching.contains("0: Tutorial Assistant: [CONTENT]"));
    assert!(branching.contains("Git is a VCS."));
}

#[tokio::test]
async fn system_prompt_comes_from_the_profile() {
    let provider = git_script();
    let profile = RoleProfile {
        name: "Ada".to_string(),
        ..RoleProfile::default()
    };
    let mut role = TutorialAssistant::new(profile, provider.boxed(), FillOptions::new("m"));
    role.run("Git").await.unwrap();

    let requests = provider.requests();
    let system = requests[0].system_prompt.as_deref().unwrap();
    assert!(system.starts_with("You are Ada, a Tutorial Assistant"));
    assert_eq!(requests[0].model, "m");
}

#[tokio::test]
async fn malformed_directory_reply_finishes_without_sections() {
    let provider = ScriptedProvider::new([
        content_reply(r#"{"Language": "en_us", "Topic": "Git"}"#),
        "I cannot produce a directory.".to_string(),
    ]);
    let mut role = assistant(&provider);

    let report = role.run("Git").await.unwrap();
    assert!(report.document.directory.is_empty());
    assert!(report.document.is_empty());
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn directory_without_brackets_yields_empty_tutorial() {
    let provider = ScriptedProvider::new([
        content_reply(r#"{"Language": "en_us", "Topic": "Git"}"#),
        content_reply(r#"{"Directory": "Introduction and Branching"}"#),
    ]);
    let mut role = assistant(&provider);

    let report = role.run("Git").await.unwrap();
    assert!(report.document.directory.is_empty());
    assert!(report.document.is_empty());
    assert_eq!(
        report.message.map(|m| m.cause_by),
        Some(ActionKind::WriteDirectory)
    );
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn outline_stops_before_content() {
    let provider = git_script();
    let mut role = assistant(&provider);

    let outline = role.outline("Write a tutorial about Git").await.unwrap();
    assert_eq!(outline.directory, vec!["Introduction", "Branching"]);
    assert!(outline.sections.is_empty());
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn failed_content_action_aborts_the_run() {
    let provider = ScriptedProvider::new([
        content_reply(r#"{"Language": "zh_cn", "Topic": "Git"}"#),
        content_reply(r#"{"Directory": "[简介, 分支]"}"#),
    ]);
    provider.push_failure("upstream unavailable");
    let mut role = assistant(&provider);

    let err = role.run("请帮我写一篇关于 Git 的教程").await.unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("Write Content"));
    assert!(rendered.contains("upstream unavailable"));
    assert_eq!(role.document().language.as_deref(), Some("zh_cn"));
    assert!(role.document().sections.is_empty());
}

#[tokio::test]
async fn missing_topic_keeps_the_request_as_title() {
    let provider = ScriptedProvider::new([
        content_reply(r#"{"Language": "en_us", "Topic": ""}"#),
        content_reply(r#"{"Directory": "[]"}"#),
    ]);
    let mut role = assistant(&provider);

    let report = role.run("  Learn Docker  ").await.unwrap();
    assert_eq!(report.document.title, "Learn Docker");
    assert!(report.document.directory.is_empty());
}

#[tokio::test]
async fn fenced_directory_reply_still_plans_sections() {
    let provider = ScriptedProvider::new([
        content_reply(r#"{"Language": "en_us", "Topic": "Git"}"#),
        "[CONTENT]\n```json\n{\"Directory\": \"[Intro, Branching]\"}\n```\n[/CONTENT]".to_string(),
        content_reply(r###"{"Content": "## Intro\nHi"}"###),
        content_reply(r###"{"Content": "## Branching\nBye"}"###),
    ]);
    let mut role = assistant(&provider);

    let report = role.run("Write a tutorial about Git").await.unwrap();

    assert_eq!(report.document.directory, vec!["Intro", "Branching"]);
    assert_eq!(report.document.sections.len(), 2);
    assert_eq!(provider.requests().len(), 4);
}

#[tokio::test]
async fn content_given_as_array_is_joined_by_line() {
    let provider = ScriptedProvider::new([
        content_reply(r#"{"Language": "en_us", "Topic": "Git"}"#),
        content_reply(r#"{"Directory": "[Intro]"}"#),
        content_reply(r###"{"Content": ["## Intro", "Git is a VCS"]}"###),
    ]);
    let mut role = assistant(&provider);

    let report = role.run("Write a tutorial about Git").await.unwrap();

    assert_eq!(
        report.document.to_markdown(),
        "# Git\n\n## Intro\nGit is a VCS\n"
    );
}
