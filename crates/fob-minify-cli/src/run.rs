//! The minify command.

use std::io::Write;
use std::path::Path;

use fob_minify::{TransformEvent, VirtualFile};
use tracing::{debug, error, warn};

use crate::cli::Cli;
use crate::config::MinifyConfig;
use crate::error::{CliError, Result, ResultExt};
use crate::input::collect_inputs;
use crate::output::write_outputs;

/// Run with the process working directory.
pub fn execute(args: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve the working directory")?;
    execute_in(args, &cwd)
}

/// Run with `cwd` as the working directory for inputs, config and outputs.
pub fn execute_in(args: Cli, cwd: &Path) -> Result<()> {
    let config = MinifyConfig::load(&args, cwd)?;
    debug!(?config, "resolved configuration");

    let inputs = collect_inputs(&args.inputs, cwd, config.base.as_deref())?;
    debug!(inputs = inputs.len(), "collected inputs");

    let events = fob_minify::transform(config.filename.clone(), config.options.clone())
        .with_working_dir(cwd)
        .run(inputs);

    let mut outputs: Vec<VirtualFile> = Vec::new();
    let mut errors = Vec::new();
    for event in events {
        match event {
            TransformEvent::File(file) => outputs.push(file),
            TransformEvent::Error(err) => errors.push(err),
            TransformEvent::End => {}
        }
    }

    let mut errors = errors.into_iter();
    if let Some(first) = errors.next() {
        for other in errors {
            error!(error = %other, "minification error");
        }
        return Err(CliError::Minify(first));
    }

    if config.stdout {
        let mut files = outputs.into_iter();
        if let Some(primary) = files.next() {
            let bytes = primary.contents().as_bytes().unwrap_or_default();
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.write_all(b"\n"))
                .context("Failed to write to stdout")?;
        }
        let rest: Vec<VirtualFile> = files.collect();
        if !rest.is_empty() {
            write_outputs(&rest, &config.out_dir, cwd)?;
        }
    } else if outputs.is_empty() {
        warn!("nothing to write");
    } else {
        write_outputs(&outputs, &config.out_dir, cwd)?;
    }

    Ok(())
}
