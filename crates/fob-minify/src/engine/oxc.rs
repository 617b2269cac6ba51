//! Production engine backed by the OXC parser, minifier and code generator.

use std::path::PathBuf;

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{
    CompressOptions as OxcCompressOptions, MangleOptions as OxcMangleOptions, Minifier,
    MinifierOptions,
};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use tracing::{debug, warn};

use super::{CompilationEngine, CompileOptions, Compiled};
use crate::error::{Error, Result};
use crate::options::{CompressOptions, MangleOptions};
use crate::sourcemap::split_by_unit;
use crate::unit::{CompilationUnit, line_starts};

/// Source name the rendered unit carries while it is a single program.
const MERGED_SOURCE: &str = "<fob-minify>";

/// Parse mode for merged sources: a classic script, so top-level bindings
/// stay global.
pub(crate) fn script_source_type() -> SourceType {
    SourceType::mjs().with_script(true)
}

/// Compiles units with `oxc_minifier` and prints them with `oxc_codegen`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OxcEngine;

impl OxcEngine {
    pub fn new() -> Self {
        Self
    }
}

impl CompilationEngine for OxcEngine {
    fn compile(&self, unit: &CompilationUnit, options: &CompileOptions) -> Result<Compiled> {
        let rendered = unit.render();
        let allocator = Allocator::default();

        let ParserReturn {
            mut program,
            errors,
            panicked,
            ..
        } = Parser::new(&allocator, rendered.text(), script_source_type()).parse();

        if panicked || !errors.is_empty() {
            let message = join_diagnostics(errors.iter().map(|e| e.to_string()));
            return Err(attribute_parse_failure(unit, message));
        }
        debug!(
            sources = unit.sources().len(),
            bytes = rendered.text().len(),
            "parsed merged unit"
        );

        let minifier_options = MinifierOptions {
            mangle: options.mangle.as_ref().map(oxc_mangle_options),
            compress: options.compress.as_ref().map(oxc_compress_options),
            ..MinifierOptions::default()
        };
        let minified = Minifier::new(minifier_options).minify(&allocator, &mut program);

        let mut codegen_options = if options.output.beautify {
            CodegenOptions::default()
        } else {
            CodegenOptions::minify()
        };
        codegen_options.single_quote = options.output.single_quotes;
        if options.source_map.is_some() {
            codegen_options.source_map_path = Some(PathBuf::from(MERGED_SOURCE));
        }

        let printed = Codegen::new()
            .with_options(codegen_options)
            .with_scoping(minified.scoping)
            .build(&program);

        let preamble = options
            .output
            .preamble
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| if p.ends_with('\n') { p.to_string() } else { format!("{p}\n") });
        let preamble_lines = preamble
            .as_deref()
            .map_or(0, |p| (line_starts(p).len() - 1) as u32);

        let map = match (&options.source_map, printed.map) {
            (Some(file), Some(merged)) => Some(split_by_unit(
                &merged,
                &rendered,
                unit,
                file,
                options.output.source_map_include_sources,
                preamble_lines,
            )),
            _ => None,
        };

        let mut code = printed.code;
        if let Some(preamble) = preamble {
            code.insert_str(0, &preamble);
        }

        debug!(bytes = code.len(), mapped = map.is_some(), "printed unit");
        Ok(Compiled { code, map })
    }
}

fn oxc_compress_options(options: &CompressOptions) -> OxcCompressOptions {
    if options.warnings {
        warn!("compress.warnings has no effect with the oxc engine");
    }
    OxcCompressOptions {
        drop_console: options.drop_console,
        drop_debugger: options.drop_debugger,
        ..OxcCompressOptions::default()
    }
}

fn oxc_mangle_options(options: &MangleOptions) -> OxcMangleOptions {
    let mut mangle = OxcMangleOptions::default();
    mangle.top_level = options.toplevel.into();
    mangle
}

/// Find the source responsible for a failed parse of the merged unit.
///
/// Falls back to the merged name when every source parses on its own, which
/// means the failure sits in a wrapper.
fn attribute_parse_failure(unit: &CompilationUnit, merged_message: String) -> Error {
    for source in unit.sources() {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source.text(), script_source_type()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let message = join_diagnostics(parsed.errors.iter().map(|e| e.to_string()));
            warn!(source = source.name(), "source failed to parse");
            return Error::compilation_failure(source.name(), message);
        }
    }
    Error::compilation_failure(MERGED_SOURCE, merged_message)
}

fn join_diagnostics(messages: impl Iterator<Item = String>) -> String {
    let messages: Vec<String> = messages.collect();
    if messages.is_empty() {
        "parser aborted".to_string()
    } else {
        messages.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OutputOptions;

    fn unit(sources: &[(&str, &str)]) -> CompilationUnit {
        let mut unit = CompilationUnit::new();
        for (name, text) in sources {
            unit.push_source(*name, *text);
        }
        unit
    }

    fn defaults() -> CompileOptions {
        CompileOptions {
            compress: Some(CompressOptions::default()),
            mangle: Some(MangleOptions::default()),
            ..CompileOptions::default()
        }
    }

    #[test]
    fn removes_unused_locals() {
        let unit = unit(&[("a.js", "function test1() { var asdf = 3; }")]);
        let compiled = OxcEngine.compile(&unit, &defaults()).unwrap();
        assert!(compiled.code.contains("test1"));
        assert!(!compiled.code.contains("asdf"));
        assert!(compiled.map.is_none());
    }

    #[test]
    fn keeps_names_without_passes() {
        let unit = unit(&[("a.js", "function test2(qwerty) { return qwerty; }")]);
        let compiled = OxcEngine.compile(&unit, &CompileOptions::default()).unwrap();
        assert!(compiled.code.contains("qwerty"));
    }

    #[test]
    fn attributes_syntax_errors_to_the_file() {
        let unit = unit(&[("ok.js", "var a = 1;"), ("bad.js", "var = ;")]);
        match OxcEngine.compile(&unit, &defaults()).unwrap_err() {
            Error::CompilationFailure { source_name, .. } => assert_eq!(source_name, "bad.js"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn map_lists_unit_sources() {
        let unit = unit(&[("a.js", "var a = 1;"), ("b/c.js", "var c = a + 1;")]);
        let options = CompileOptions {
            source_map: Some("out.js.map".into()),
            ..defaults()
        };
        let map = OxcEngine.compile(&unit, &options).unwrap().map.unwrap();
        let sources: Vec<&str> = map.get_sources().map(|s| s.as_ref()).collect();
        assert_eq!(sources, vec!["a.js", "b/c.js"]);
        assert_eq!(map.get_file().map(|f| f.as_ref()), Some("out.js.map"));
        assert!(map.get_tokens().any(|token| token.get_source_id() == Some(1)));
    }

    #[test]
    fn preamble_leads_the_output() {
        let unit = unit(&[("a.js", "var a = 1;")]);
        let options = CompileOptions {
            output: OutputOptions {
                preamble: Some("/* banner */".into()),
                ..OutputOptions::default()
            },
            source_map: Some("out.js.map".into()),
            ..defaults()
        };
        let compiled = OxcEngine.compile(&unit, &options).unwrap();
        assert!(compiled.code.starts_with("/* banner */\n"));
        let map = compiled.map.unwrap();
        assert!(map.get_tokens().all(|token| token.get_dst_line() >= 1));
        assert!(map.to_json_string().contains(r#""mappings":";"#));
    }
}
