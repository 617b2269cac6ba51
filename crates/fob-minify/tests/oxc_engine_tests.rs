//! End-to-end tests through the OXC engine. Most assertions check for names
//! rather than exact code; the single-file case pins the exact output.

mod helpers;

use std::path::PathBuf;

use fob_minify::{
    Enclose, Error, MangleOptions, MinifyOptions, OutputOptions, SourceMapTarget, TransformEvent,
};
use helpers::{CWD, errors, files, fixture, map_file, map_sources, parse_map, text};

const TEST1: &str = "function test1() {\n  var asdf = 3;\n}\n";
const TEST2: &str = "function test2(qwerty) {\n  return qwerty + 1;\n}\n";

fn run(
    filename: Option<&str>,
    options: MinifyOptions,
    inputs: &[(&str, &str)],
) -> Vec<TransformEvent> {
    fob_minify::transform(filename.map(String::from), options)
        .with_working_dir(CWD)
        .run(inputs.iter().map(|(name, text)| fixture(name, text)))
}

#[test]
fn test_minifies_a_single_file() {
    let events = run(None, MinifyOptions::default(), &[("file1.js", TEST1)]);

    assert!(errors(&events).is_empty());
    let outputs = files(&events);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].relative(), PathBuf::from("file1.js"));

    assert_eq!(text(outputs[0]), "function test1(){}");
}

#[test]
fn test_merges_and_mangles_multiple_files() {
    let events = run(
        Some("test.js"),
        MinifyOptions::default(),
        &[("file1.js", TEST1), ("file2.js", TEST2)],
    );

    let outputs = files(&events);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].relative(), PathBuf::from("test.js"));

    let code = text(outputs[0]);
    let first = code.find("test1").unwrap();
    let second = code.find("test2").unwrap();
    assert!(first < second);
    assert!(!code.contains("asdf"));
    assert!(!code.contains("qwerty"));
}

#[test]
fn test_disabled_passes_keep_local_names() {
    let options = MinifyOptions::default()
        .with_compress(false)
        .with_mangle(false);
    let events = run(None, options, &[("file2.js", TEST2)]);

    let code = text(files(&events)[0]);
    assert!(code.contains("qwerty"));
}

#[test]
fn test_empty_mangle_object_still_renames() {
    let options = MinifyOptions::default().with_mangle(MangleOptions::default());
    let events = run(None, options, &[("file2.js", TEST2)]);

    assert!(!text(files(&events)[0]).contains("qwerty"));
}

#[test]
fn test_source_map_names_every_input() {
    let options = MinifyOptions::default()
        .with_source_map(SourceMapTarget::Derived)
        .with_base_path("test");
    let events = run(
        Some("test.js"),
        options,
        &[("file1.js", TEST1), ("file2.js", TEST2)],
    );

    let outputs = files(&events);
    assert_eq!(outputs.len(), 2);
    assert!(text(outputs[0]).ends_with("\r\n//# sourceMappingURL=test.js.map"));

    let map = parse_map(outputs[1]);
    assert_eq!(map_file(&map).as_deref(), Some("test.js.map"));
    assert_eq!(map_sources(&map), vec!["file1.js", "file2.js"]);
    assert!(map.get_source_contents().all(|content| content.is_none()));

    let sources_hit: Vec<u32> = map
        .get_tokens()
        .filter_map(|token| token.get_source_id())
        .collect();
    assert!(sources_hit.contains(&0));
    assert!(sources_hit.contains(&1));
}

#[test]
fn test_source_map_can_embed_sources() {
    let mut options = MinifyOptions::default().with_source_map(SourceMapTarget::Derived);
    options.output = OutputOptions {
        source_map_include_sources: true,
        ..OutputOptions::default()
    };
    let events = run(None, options, &[("file1.js", TEST1)]);

    let map = parse_map(files(&events)[1]);
    let contents: Vec<Option<String>> = map
        .get_source_contents()
        .map(|content| content.map(|c| c.to_string()))
        .collect();
    assert_eq!(contents, vec![Some(TEST1.to_string())]);
}

#[test]
fn test_wrap_exports_top_level_functions() {
    let options = MinifyOptions::default().with_wrap("testExport", true);
    let events = run(None, options, &[("file1.js", TEST1), ("file2.js", TEST2)]);

    assert!(errors(&events).is_empty());
    let code = text(files(&events)[0]);
    assert!(code.contains("testExport"));
    assert!(code.contains("test1"));
    assert!(code.contains("test2"));
}

#[test]
fn test_enclose_wraps_in_a_closure() {
    let options = MinifyOptions::default()
        .with_mangle(false)
        .with_compress(false)
        .with_enclose(Enclose::Single("window:w".into()));
    let events = run(None, options, &[("file1.js", "w.answer = 42;")]);

    let code = text(files(&events)[0]);
    assert!(code.contains("function(w)"));
    assert!(code.contains("window"));
    assert!(code.contains("answer"));
}

#[test]
fn test_syntax_error_names_the_file() {
    let events = run(
        None,
        MinifyOptions::default(),
        &[("file1.js", TEST1), ("broken.js", "function ( {")],
    );

    assert!(files(&events).is_empty());
    match errors(&events)[..] {
        [Error::CompilationFailure { source_name, .. }] => {
            assert_eq!(source_name, "test/broken.js")
        }
        ref other => panic!("unexpected errors: {other:?}"),
    }
    assert!(matches!(events.last(), Some(TransformEvent::End)));
}

#[test]
fn test_preamble_is_kept() {
    let mut options = MinifyOptions::default();
    options.output.preamble = Some("/*! banner */".into());
    let events = run(None, options, &[("file1.js", TEST1)]);

    assert!(text(files(&events)[0]).starts_with("/*! banner */\n"));
}
