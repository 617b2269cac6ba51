//! Output assembly.
//!
//! Runs once per transform, after the last file, on a [`PreparedUnit`].
//! Applies the configured wrappers, hands the unit to the engine and turns
//! the result into the primary output and, when requested, its map.

use std::path::Path;

use path_clean::PathClean;
use tracing::{debug, info};

use crate::accumulator::{BaseFile, PreparedUnit};
use crate::engine::{CompilationEngine, CompileOptions};
use crate::error::{Error, Result};
use crate::options::MinifyOptions;
use crate::vfile::VirtualFile;

/// Build the output files for a prepared unit. The primary file always
/// comes first; the map, if any, second.
pub fn assemble<E: CompilationEngine + ?Sized>(
    prepared: PreparedUnit,
    options: &MinifyOptions,
    engine: &E,
) -> Result<Vec<VirtualFile>> {
    let PreparedUnit {
        base_file,
        filename,
        map_filename,
        mut unit,
    } = prepared;

    if let Some(name) = options.wrap_name() {
        unit.wrap_commonjs(name, options.export_all)?;
    }
    if let Some(arguments) = options.enclose_arguments() {
        unit.wrap_enclose(&arguments);
    }

    debug!(
        sources = unit.sources().len(),
        wrapped = unit.is_wrapped(),
        "compiling unit"
    );
    let compile_options = CompileOptions::from_options(options, map_filename.clone());
    let compiled = engine.compile(&unit, &compile_options)?;

    let mut code = compiled.code;
    let map = match (&map_filename, compiled.map) {
        (Some(map_filename), Some(map)) => {
            code.push_str("\r\n//# sourceMappingURL=");
            code.push_str(map_filename);
            Some((map_filename, map.to_json_string()))
        }
        (Some(map_filename), None) => {
            return Err(Error::source_map(format!(
                "engine returned no source map for {map_filename}"
            )));
        }
        (None, _) => None,
    };

    let mut outputs = vec![output_file(&base_file, &filename, code.into_bytes())];
    if let Some((map_filename, json)) = map {
        outputs.push(output_file(&base_file, map_filename, json.into_bytes()));
    }

    info!(
        filename = %filename,
        sources = unit.sources().len(),
        outputs = outputs.len(),
        "minified"
    );
    Ok(outputs)
}

fn output_file(base_file: &BaseFile, name: &str, contents: Vec<u8>) -> VirtualFile {
    VirtualFile::new(base_file.base.join(Path::new(name)).clean())
        .with_cwd(base_file.cwd.clone())
        .with_base(base_file.base.clone())
        .with_contents(contents)
}
