use std::fs;
use std::path::Path;
use std::thread;
use tempfile::TempDir;
use xsummary_core::{AppError, GeneratorOptions, SummaryGenerator};

fn write(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn book() -> TempDir {
    let tmp = tempfile::Builder::new().prefix("book").tempdir().unwrap();
    write(tmp.path(), "a/doc1.md");
    write(tmp.path(), "a/b/doc2.md");
    tmp
}

fn generate(options: GeneratorOptions) -> String {
    SummaryGenerator::new(options).generate().unwrap()
}

fn root_name(tmp: &TempDir) -> String {
    tmp.path().file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn nested_directories_produce_indented_outline() {
    let tmp = book();
    let name = root_name(&tmp);

    let summary = generate(GeneratorOptions::new(tmp.path()));

    let expected = format!(
        "# {name}\n\n- [{name}](README.md)\n- [a](a/README.md)\n  - [b](a/b/README.md)\n    - [doc2](a/b/doc2.md)\n\n  - [doc1](a/doc1.md)\n"
    );
    assert_eq!(summary, expected);
    assert_eq!(
        fs::read_to_string(tmp.path().join("a/README.md")).unwrap(),
        "# a\n"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("a/b/README.md")).unwrap(),
        "# b\n"
    );
    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn second_run_is_byte_identical() {
    let tmp = book();
    write(tmp.path(), "a/extra.md");
    write(tmp.path(), "c/d/e/deep.md");
    write(tmp.path(), "top.md");
    fs::create_dir_all(tmp.path().join("empty/nested")).unwrap();

    let first = generate(GeneratorOptions::new(tmp.path()));
    let second = generate(GeneratorOptions::new(tmp.path()));
    assert_eq!(first, second);
}

#[test]
fn empty_directory_gets_no_line() {
    let tmp = book();
    fs::create_dir_all(tmp.path().join("empty/inner")).unwrap();
    write(tmp.path(), "empty/inner/notes.txt");

    let summary = generate(GeneratorOptions::new(tmp.path()));
    assert!(!summary.contains("empty"));
    assert!(summary.contains("- [a](a/README.md)"));
}

#[test]
fn ignored_directory_and_descendants_are_omitted() {
    let tmp = book();
    write(tmp.path(), "a/b/c/deeper.md");

    let mut options = GeneratorOptions::new(tmp.path());
    options.ignored_dirs = vec![tmp.path().join("a/b")];
    let summary = generate(options);

    assert!(summary.contains("- [a](a/README.md)"));
    assert!(summary.contains("  - [doc1](a/doc1.md)"));
    assert!(!summary.contains("a/b"));
    assert!(!summary.contains("doc2"));
    assert!(!summary.contains("deeper"));
    assert!(!tmp.path().join("a/b/README.md").exists());
}

#[test]
fn ignore_prefix_does_not_match_sibling_with_longer_name() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "foo/bar/hidden.md");
    write(tmp.path(), "foo/barbaz/shown.md");

    let mut options = GeneratorOptions::new(tmp.path());
    options.ignored_dirs = vec![tmp.path().join("foo/bar")];
    let summary = generate(options);

    assert!(summary.contains("- [barbaz](foo/barbaz/README.md)"));
    assert!(summary.contains("- [shown](foo/barbaz/shown.md)"));
    assert!(!summary.contains("hidden"));
}

#[test]
fn directory_with_only_ignored_content_is_not_listed() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a/b/doc2.md");

    let mut options = GeneratorOptions::new(tmp.path());
    options.ignored_dirs = vec![tmp.path().join("a/b")];
    let summary = generate(options);
    assert!(!summary.contains("[a]"));
}

#[test]
fn directory_with_only_an_ignored_page_is_not_listed() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a/secret.md");

    let mut options = GeneratorOptions::new(tmp.path());
    options.ignored_dirs = vec![tmp.path().join("a/secret.md")];
    let summary = generate(options);
    assert!(!summary.contains("a/README.md"));
    assert!(!tmp.path().join("a/README.md").exists());
}

#[test]
fn reserved_names_never_become_links() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "README.md");
    write(tmp.path(), "SUMMARY.md");
    write(tmp.path(), "guide/README.md");
    write(tmp.path(), "guide/SUMMARY.md");
    write(tmp.path(), "guide/page.md");

    let summary = generate(GeneratorOptions::new(tmp.path()));
    assert!(!summary.contains("](SUMMARY.md)"));
    assert!(!summary.contains("[SUMMARY]"));
    assert!(!summary.contains("guide/SUMMARY.md"));
    assert_eq!(summary.matches("](guide/README.md)").count(), 1);
    assert!(summary.contains("  - [page](guide/page.md)"));
}

#[test]
fn spaces_are_percent_encoded_in_targets_only() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "user guide/first steps.md");

    let summary = generate(GeneratorOptions::new(tmp.path()));
    assert!(summary.contains("- [user guide](user%20guide/README.md)"));
    assert!(summary.contains("  - [first steps](user%20guide/first%20steps.md)"));
}

#[test]
fn indentation_matches_path_depth() {
    let tmp = book();
    write(tmp.path(), "x/y/z/w/leaf.md");
    write(tmp.path(), "x/y/mid.md");
    write(tmp.path(), "root.md");

    let summary = generate(GeneratorOptions::new(tmp.path()));
    for line in summary.lines().filter(|l| l.trim_start().starts_with("- [")) {
        let indent = line.len() - line.trim_start().len();
        let target = &line[line.rfind("](").unwrap() + 2..line.len() - 1];
        let separators = target.matches('/').count();
        let depth = if target != "README.md" && target.ends_with("/README.md") {
            separators - 1
        } else {
            separators
        };
        assert_eq!(indent, 2 * depth, "bad indentation on line {:?}", line);
    }
}

#[test]
fn explicit_titles_override_defaults() {
    let tmp = book();
    let mut options = GeneratorOptions::new(tmp.path());
    options.summary_title = Some("Handbook".to_string());
    options.readme_title = Some("Welcome".to_string());

    let summary = generate(options);
    assert!(summary.starts_with("# Handbook\n\n- [Welcome](README.md)"));
}

#[test]
fn root_readme_created_when_root_has_pages() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "intro.md");

    let summary = generate(GeneratorOptions::new(tmp.path()));
    let name = root_name(&tmp);
    assert_eq!(
        summary,
        format!("# {name}\n\n- [{name}](README.md)\n- [intro](intro.md)\n")
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("README.md")).unwrap(),
        format!("# {name}\n")
    );
}

#[test]
fn no_readme_side_effect_when_disabled() {
    let tmp = book();
    let mut options = GeneratorOptions::new(tmp.path());
    options.create_missing_readme = false;

    let summary = generate(options);
    assert!(summary.contains("- [a](a/README.md)"));
    assert!(!tmp.path().join("a/README.md").exists());
    assert!(!tmp.path().join("a/b/README.md").exists());
}

#[test]
fn relative_root_is_resolved_without_changing_directory() {
    let tmp = book();
    let cwd = std::env::current_dir().unwrap();
    let relative = pathdiff::diff_paths(tmp.path(), &cwd).unwrap();
    assert!(relative.is_relative());

    let summary = generate(GeneratorOptions::new(relative));
    assert!(summary.contains("  - [b](a/b/README.md)"));
    assert_eq!(std::env::current_dir().unwrap(), cwd);
}

#[test]
fn concurrent_generations_are_independent() {
    let books: Vec<TempDir> = (0..4)
        .map(|i| {
            let tmp = TempDir::new().unwrap();
            write(tmp.path(), &format!("chapter{i}/page{i}.md"));
            tmp
        })
        .collect();

    let handles: Vec<_> = books
        .iter()
        .enumerate()
        .map(|(i, tmp)| {
            let root = tmp.path().to_path_buf();
            thread::spawn(move || (i, generate(GeneratorOptions::new(root))))
        })
        .collect();

    for handle in handles {
        let (i, summary) = handle.join().unwrap();
        assert!(summary.contains(&format!("- [chapter{i}](chapter{i}/README.md)")));
        assert!(summary.contains(&format!("  - [page{i}](chapter{i}/page{i}.md)")));
    }
}

#[test]
fn missing_root_fails_the_run() {
    let tmp = TempDir::new().unwrap();
    let err = SummaryGenerator::new(GeneratorOptions::new(tmp.path().join("absent")))
        .generate()
        .unwrap_err();
    assert!(matches!(err, AppError::RootNotFound(_)));
}
