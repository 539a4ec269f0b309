use qwer::Command;
use qwer::resolve::Resolution;

fn build(source: &str) -> Command {
    qwer::parser::Parser::new(source.to_string(), 0).parse().root
}

fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn listing(root: &Command) -> Vec<String> {
    qwer::list(root, "").collect()
}

fn code<'a>(root: &'a Command, path: &[&str]) -> &'a str {
    &root.find(path).expect("command missing").code
}

#[test]
fn title_heading_never_becomes_a_command() {
    let source = "# Project\n\n```\necho title\n```\n\n## build\n\n```\nmake\n```\n";
    for _ in 0..2 {
        let root = build(source);
        assert_eq!(root.children.len(), 1);
        assert!(root.child("project").is_none());
        assert_eq!(code(&root, &["build"]), "make");
    }
}

#[test]
fn title_heading_keeps_current_command() {
    let root = build("## build\n# Notes\n```\nmake\n```\n");
    assert_eq!(code(&root, &["build"]), "make");
}

#[test]
fn equal_level_heading_closes_deeper_sections() {
    let root = build("## a\n### b\n## c\n");
    assert_eq!(
        root.children.keys().collect::<Vec<_>>(),
        ["a", "c"]
    );
    assert!(root.find(&["a", "b"]).is_some());
    assert!(root.find(&["b", "c"]).is_none());
    assert!(root.find(&["a", "c"]).is_none());
}

#[test]
fn skipped_levels_still_nest() {
    let root = build("## a\n#### deep\n```\necho deep\n```\n### mid\n");
    assert_eq!(code(&root, &["a", "deep"]), "echo deep");
    assert!(root.find(&["a", "mid"]).is_some());
    assert_eq!(root.find(&["a", "deep"]).unwrap().level, 4);
}

#[test]
fn heading_text_is_normalized() {
    let root = build("## Run  *All*   Tests\n```\ncargo test\n```\n## `fmt` Check\n    cargo fmt\n");
    assert_eq!(code(&root, &["run-all-tests"]), "cargo test");
    assert_eq!(code(&root, &["fmt-check"]), "cargo fmt");
}

#[test]
fn last_code_block_wins_and_is_trimmed() {
    let root = build("## build\n```sh\nfirst\n```\ntext\n```bash\n\n  make all\n\n```\n");
    assert_eq!(code(&root, &["build"]), "make all");
}

#[test]
fn code_block_in_list_attaches_to_current_command() {
    let root = build("## setup\n\n- step one:\n\n  ```\n  npm install\n  ```\n");
    assert_eq!(code(&root, &["setup"]), "npm install");
}

#[test]
fn heading_without_code_is_a_namespace() {
    let root = build("## deploy\nSome prose.\n### staging\n```\n./deploy staging\n```\n");
    let deploy = root.child("deploy").unwrap();
    assert!(deploy.code.is_empty());
    assert!(deploy.is_namespace());
    assert_eq!(code(&root, &["deploy", "staging"]), "./deploy staging");
}

#[test]
fn merge_keeps_code_when_override_is_empty() {
    let mut root = build("## a\n```\nx\n```\n");
    qwer::merge(&mut root, build("## a\n"));
    assert_eq!(code(&root, &["a"]), "x");
}

#[test]
fn merge_overrides_code() {
    let mut root = build("## a\n```\nx\n```\n");
    qwer::merge(&mut root, build("## a\n```\ny\n```\n"));
    assert_eq!(code(&root, &["a"]), "y");
}

#[test]
fn merge_is_additive_for_disjoint_children() {
    let mut root = build("## a\n### c\n```\necho c\n```\n");
    qwer::merge(&mut root, build("## a\n### b\n```\necho b\n```\n"));
    assert_eq!(listing(&root), ["a b", "a c"]);
}

#[test]
fn merge_overrides_code_but_keeps_grandchildren() {
    let general = build("## db\n```\necho db\n```\n### migrate\n```\necho migrate\n```\n");
    let specific = build("## db\n```\necho local db\n```\n## lint\n```\necho lint\n```\n");
    let root = qwer::merge_all([general, specific]);
    assert_eq!(code(&root, &["db"]), "echo local db");
    assert_eq!(code(&root, &["db", "migrate"]), "echo migrate");
    assert_eq!(listing(&root), ["db", "db migrate", "lint"]);
}

#[test]
fn merge_never_reconciles_level() {
    let mut root = build("## a\n```\nx\n```\n");
    qwer::merge(&mut root, build("### a\n```\ny\n```\n"));
    let a = root.child("a").unwrap();
    assert_eq!(a.code, "y");
    assert_eq!(a.level, 2);
}

fn deploy_tree() -> Command {
    build(
        "# Ops\n## deploy\n```\n./deploy.sh\n```\n### staging\n```\n./deploy.sh staging\n```\n## run\n```\necho run\n```\n",
    )
}

#[test]
fn longest_prefix_wins() {
    let root = deploy_tree();
    let args = tokens(&["deploy", "staging", "--verbose"]);
    match qwer::resolve(&root, &args, None) {
        Resolution::Runnable { command, path, extra } => {
            assert_eq!(command.code, "./deploy.sh staging");
            assert_eq!(path, ["deploy", "staging"]);
            assert_eq!(extra, ["--verbose"]);
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn unmatched_tail_becomes_extra_arguments() {
    let root = deploy_tree();
    let args = tokens(&["deploy", "prod"]);
    match qwer::resolve(&root, &args, None) {
        Resolution::Runnable { command, path, extra } => {
            assert_eq!(command.code, "./deploy.sh");
            assert_eq!(path, ["deploy"]);
            assert_eq!(extra, ["prod"]);
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn separator_forces_the_boundary() {
    let root = build("## run\n```\necho run\n```\n### build\n```\necho nested\n```\n");
    let argv = tokens(&["run", "--", "build"]);
    let boundary = qwer::separator_boundary(&argv);
    assert_eq!(boundary, Some(1));

    let args = tokens(&["run", "build"]);
    match qwer::resolve(&root, &args, boundary) {
        Resolution::Runnable { command, path, extra } => {
            assert_eq!(command.code, "echo run");
            assert_eq!(path, ["run"]);
            assert_eq!(extra, ["build"]);
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn tokens_before_separator_shorten_by_prefix_and_keep_order() {
    let root = deploy_tree();
    let args = tokens(&["deploy", "now", "--force", "x"]);
    match qwer::resolve(&root, &args, Some(2)) {
        Resolution::Runnable { path, extra, .. } => {
            assert_eq!(path, ["deploy"]);
            assert_eq!(extra, ["now", "--force", "x"]);
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn empty_arguments_list_everything() {
    let root = deploy_tree();
    assert_eq!(qwer::resolve(&root, &[], None), Resolution::ListAll);
    assert_eq!(
        qwer::resolve(&root, &tokens(&["ignored"]), Some(0)),
        Resolution::ListAll
    );
}

#[test]
fn unknown_command_is_not_found() {
    let root = deploy_tree();
    let args = tokens(&["staging", "deploy"]);
    assert_eq!(
        qwer::resolve(&root, &args, None),
        Resolution::NotFound {
            tokens: tokens(&["staging", "deploy"])
        }
    );
}

#[test]
fn namespace_hit_is_distinguishable() {
    let root = build("## deploy\n### staging\n```\necho s\n```\n");
    let args = tokens(&["deploy", "prod"]);
    match qwer::resolve(&root, &args, None) {
        Resolution::Namespace { command, path } => {
            assert_eq!(path, ["deploy"]);
            assert_eq!(
                qwer::list(command, &path.join(" ")).collect::<Vec<_>>(),
                ["deploy staging"]
            );
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn listing_names_exactly_the_headings_with_code() {
    let source = "\
# Tasks

## build
```
make
```

## docs
Prose only.

### serve
#### watch
##### verbose
```
mdbook serve --verbose
```

## test
    cargo test
";
    let root = build(source);
    assert_eq!(
        listing(&root),
        ["build", "docs serve watch verbose", "test"]
    );
}
