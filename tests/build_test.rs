//! Builds a small site end to end.

use inkpost::{build_site, Args};
use std::fs;
use std::path::Path;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn long_item() -> String {
    "A list item that rambles on for a good while so the whole list reads like prose rather than a quick set of bullet points, which is exactly the case this styling exists for.".to_string()
}

fn setup(content: &Path) {
    write(
        &content.join("articles/remote-work.md"),
        &format!(
            "---\ntitle: Remote Work\npubDate: 2024-05-01\n---\n\nWorking apart takes more deliberate communication than most teams expect.[^1]\n\n- {0}\n- {0}\n\n[^1]: Based on ten years of consulting.\n",
            long_item()
        ),
    );
    write(
        &content.join("articles/draft.md"),
        "---\ntitle: Unfinished\ndraft: true\npubDate: 2024-06-01\n---\n\nNot ready yet but long enough to summarise nicely.\n",
    );
    write(
        &content.join("articles/styleguide.mdx"),
        "---\ntitle: Styleguide\nstyleguide: true\n---\n\nimport Callout from './Callout.astro';\n\nEvery element the site can render, shown once.\n",
    );
    write(&content.join("articles/_partial.md"), "Not an entry.\n");
    write(&content.join("articles/cover.png"), "png");
    write(
        &content.join("notes/quick-thought.md"),
        "---\ntitle: Quick Thought\ndescription: A short note about async standups.\npubDate: 2024-04-01\nsourceURL: https://example.com/standups\n---\n\nWrite `[^1]` to add a footnote.\n",
    );
}

fn run(content: &Path, output: &Path, production: bool) {
    let args = Args {
        content_dir: content.to_path_buf(),
        output_dir: output.to_path_buf(),
        config: None,
        templates: None,
        production,
    };
    build_site(&args).expect("build should succeed");
}

#[test]
fn test_production_build() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    let output = dir.path().join("dist");
    setup(&content);

    run(&content, &output, true);

    let article = fs::read_to_string(output.join("writing/remote-work.html")).unwrap();
    assert!(article.contains("<ul class=\"long-list-items\">"));
    assert!(article.contains("footnotes.js"));
    assert!(article.contains("1 min read"));

    let note = fs::read_to_string(output.join("notes/quick-thought.html")).unwrap();
    assert!(note.contains("<code>[^1]</code>"));
    assert!(!note.contains("footnotes.js"));
    assert!(note.contains("https://example.com/standups") || note.contains("https:&#x2F;&#x2F;example.com&#x2F;standups"));

    // Styleguide pages render but are never listed; drafts are skipped.
    assert!(output.join("writing/styleguide.html").exists());
    assert!(!output.join("writing/draft.html").exists());
    assert!(!output.join("writing/_partial.html").exists());
    assert!(output.join("writing/cover.png").exists());

    let index = fs::read_to_string(output.join("index.html")).unwrap();
    assert!(index.contains("Working apart takes more deliberate communication"));
    assert!(index.contains("A short note about async standups."));
    assert!(!index.contains("Styleguide"));
    assert!(!index.contains("Unfinished"));
    let article_pos = index.find("Remote Work").unwrap();
    let note_pos = index.find("Quick Thought").unwrap();
    assert!(article_pos < note_pos, "newest entry should be listed first");
}

#[test]
fn test_development_build_keeps_drafts() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    let output = dir.path().join("dist");
    setup(&content);

    run(&content, &output, false);

    assert!(output.join("writing/draft.html").exists());
    let index = fs::read_to_string(output.join("index.html")).unwrap();
    assert!(index.contains("Unfinished"));
    assert!(!index.contains("Styleguide"));
}

#[test]
fn test_missing_title_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    write(&content.join("notes/untitled.md"), "---\ndraft: false\n---\n\nBody.\n");

    let args = Args {
        content_dir: content,
        output_dir: dir.path().join("dist"),
        config: None,
        templates: None,
        production: false,
    };
    let err = build_site(&args).unwrap_err();
    assert!(matches!(err, inkpost::Error::MissingTitle { .. }));
}

#[test]
fn test_traversing_slug_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    let output = dir.path().join("dist");
    write(
        &content.join("articles/escape.md"),
        "---\ntitle: Escape\nslug: ../../outside\n---\n\nTrying to write above the output directory.\n",
    );

    let args = Args {
        content_dir: content,
        output_dir: output,
        config: None,
        templates: None,
        production: false,
    };
    let err = build_site(&args).unwrap_err();
    assert!(matches!(err, inkpost::Error::InvalidSlug { .. }));
    assert!(!dir.path().join("outside.html").exists());
}
