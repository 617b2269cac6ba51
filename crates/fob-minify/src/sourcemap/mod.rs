//! Source maps.
//!
//! Maps are [`oxc_sourcemap::SourceMap`]s. The engine prints the rendered
//! unit as a single source; [`split_by_unit`] rebuilds that map so every
//! token points into the file it came from.

pub use oxc_sourcemap::{SourceMap, SourceMapBuilder, Token};

use crate::unit::{CompilationUnit, RenderedUnit};

/// Rebuild a map whose only source is the rendered unit into a map with one
/// source per unit entry, anchored at `file`.
///
/// Tokens that point at wrapper or separator lines have no file to point
/// into and are dropped. Columns carry over unchanged because every entry
/// starts at the beginning of a rendered line. `line_offset` pushes every
/// generated position down, for text prepended after printing.
pub(crate) fn split_by_unit(
    merged: &SourceMap,
    rendered: &RenderedUnit,
    unit: &CompilationUnit,
    file: &str,
    include_sources: bool,
    line_offset: u32,
) -> SourceMap {
    let mut builder = SourceMapBuilder::default();
    builder.set_file(file);
    for source in unit.sources() {
        builder.set_source_and_content(source.name(), source.text());
    }

    for token in merged.get_source_view_tokens() {
        let dst_line = token.get_dst_line() + line_offset;
        let original = match token.get_source_id() {
            Some(_) => match rendered.locate(token.get_src_line()) {
                Some((source, line)) => Some((source as u32, line)),
                None => continue,
            },
            None => None,
        };
        let name_id = token.get_name().map(|name| builder.add_name(name));
        match original {
            Some((source, line)) => builder.add_token(
                dst_line,
                token.get_dst_col(),
                line,
                token.get_src_col(),
                Some(source),
                name_id,
            ),
            None => builder.add_token(dst_line, token.get_dst_col(), 0, 0, None, name_id),
        }
    }

    let mut map = builder.into_sourcemap();
    if !include_sources {
        map.set_source_contents(vec![None; unit.sources().len()]);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_file_unit() -> CompilationUnit {
        let mut unit = CompilationUnit::new();
        unit.push_source("a.js", "var a = 1;\nvar b = 2;\n");
        unit.push_source("lib/c.js", "var c = 3;");
        unit
    }

    /// rendered lines: 0 "var a", 1 "var b", 2 ";", 3 "var c"
    fn merged_map() -> SourceMap {
        let mut builder = SourceMapBuilder::default();
        let merged = builder.set_source_and_content("<merged>", "");
        let name = builder.add_name("c");
        builder.add_token(0, 0, 1, 4, Some(merged), None);
        builder.add_token(0, 6, 2, 0, Some(merged), None);
        builder.add_token(0, 7, 3, 4, Some(merged), Some(name));
        builder.add_token(0, 9, 0, 0, None, None);
        builder.into_sourcemap()
    }

    #[test]
    fn split_points_tokens_into_each_file() {
        let unit = two_file_unit();
        let split = split_by_unit(&merged_map(), &unit.render(), &unit, "out.js.map", false, 0);

        assert_eq!(split.get_file().map(|f| f.as_ref()), Some("out.js.map"));
        let sources: Vec<&str> = split.get_sources().map(|s| s.as_ref()).collect();
        assert_eq!(sources, vec!["a.js", "lib/c.js"]);
        assert!(split.get_source_contents().all(|content| content.is_none()));

        let tokens: Vec<Token> = split.get_tokens().collect();
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 0, 1, 4, Some(0), None),
                Token::new(0, 7, 0, 4, Some(1), Some(0)),
                Token::new(0, 9, 0, 0, None, None),
            ]
        );
        assert_eq!(split.get_name(0).map(|n| n.as_ref()), Some("c"));
    }

    #[test]
    fn split_can_embed_sources() {
        let unit = two_file_unit();
        let split = split_by_unit(&merged_map(), &unit.render(), &unit, "m.map", true, 0);
        let contents: Vec<Option<&str>> =
            split.get_source_contents().map(|c| c.map(|c| c.as_ref())).collect();
        assert_eq!(contents, vec![Some("var a = 1;\nvar b = 2;\n"), Some("var c = 3;")]);
        assert!(split.to_json_string().contains(r#""sourcesContent":["#));
    }

    #[test]
    fn line_offset_shifts_generated_lines() {
        let unit = two_file_unit();
        let split = split_by_unit(&merged_map(), &unit.render(), &unit, "m.map", false, 2);
        assert!(split.get_tokens().all(|token| token.get_dst_line() == 2));
        assert!(split.to_json_string().contains(r#""mappings":";;"#));
    }
}
