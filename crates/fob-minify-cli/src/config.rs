//! Layered configuration.
//!
//! Priority: CLI flags > `FOB_MINIFY_*` environment > config file > defaults.
//! The config file is `--config <path>`, else `fob-minify.json` or
//! `fob-minify.toml` in the working directory. Minify options sit at the top
//! level of the file next to the CLI-only keys:
//!
//! ```json
//! {
//!   "filename": "app.min.js",
//!   "outDir": "public",
//!   "outSourceMap": true,
//!   "mangle": { "toplevel": true },
//!   "enclose": ["window:w"]
//! }
//! ```

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use fob_minify::MinifyOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{ConfigError, Result};

/// Environment variable prefix; `__` separates nested keys.
pub const ENV_PREFIX: &str = "FOB_MINIFY_";

const CONFIG_FILES: [&str; 2] = ["fob-minify.json", "fob-minify.toml"];

/// Resolved configuration for one CLI run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyConfig {
    /// Output filename; defaults to the first input's relative path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub out_dir: PathBuf,
    /// Base directory for inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<PathBuf>,
    pub stdout: bool,
    #[serde(flatten)]
    pub options: MinifyOptions,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            filename: None,
            out_dir: PathBuf::from("dist"),
            base: None,
            stdout: false,
            options: MinifyOptions::default(),
        }
    }
}

impl MinifyConfig {
    /// Load configuration from every source, resolving files against `cwd`.
    pub fn load(args: &Cli, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file(args.config.as_deref(), cwd)? {
            debug!(path = %path.display(), "loading config file");
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                _ => figment.merge(Json::file(path)),
            };
        }

        figment = figment.merge(Serialized::defaults(env_overrides()?));
        figment = figment.merge(Serialized::defaults(cli_overrides(args)));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.filename.as_deref() == Some("") {
            return Err(ConfigError::InvalidValue {
                field: "filename".into(),
                value: "\"\"".into(),
                hint: "Omit filename to name the output after the first input".into(),
            }
            .into());
        }
        if self.options.export_all && self.options.wrap_name().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "exportAll".into(),
                value: "true".into(),
                hint: "exportAll only applies together with wrap".into(),
            }
            .into());
        }
        Ok(())
    }
}

fn config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        return if path.is_file() {
            Ok(Some(path))
        } else {
            Err(ConfigError::NotFound(path).into())
        };
    }
    Ok(CONFIG_FILES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file()))
}

/// `FOB_MINIFY_*` variables as a nested value with camelCase top-level keys,
/// so `FOB_MINIFY_OUT_SOURCE_MAP` lands on `outSourceMap` and
/// `FOB_MINIFY_COMPRESS__DROP_CONSOLE` on `compress.drop_console`.
fn env_overrides() -> Result<Value> {
    let raw: Value = Figment::from(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(ConfigError::from)?;
    Ok(camel_case_keys(raw))
}

fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camel_case(&key), value))
                .collect(),
        ),
        other => other,
    }
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Flags the user actually passed, in config shape.
fn cli_overrides(args: &Cli) -> Value {
    let mut map = Map::new();
    let mut output = Map::new();

    if let Some(filename) = &args.output {
        map.insert("filename".into(), json!(filename));
    }
    if let Some(out_dir) = &args.out_dir {
        map.insert("outDir".into(), json!(out_dir.to_string_lossy()));
    }
    if let Some(base) = &args.base {
        map.insert("base".into(), json!(base.to_string_lossy()));
    }
    if args.stdout {
        map.insert("stdout".into(), json!(true));
    }
    match &args.source_map {
        Some(Some(file)) => {
            map.insert("outSourceMap".into(), json!(file));
        }
        Some(None) => {
            map.insert("outSourceMap".into(), json!(true));
        }
        None => {}
    }
    if let Some(base_path) = &args.base_path {
        map.insert("basePath".into(), json!(base_path.to_string_lossy()));
    }
    if args.no_compress {
        map.insert("compress".into(), json!(false));
    }
    if args.no_mangle {
        map.insert("mangle".into(), json!(false));
    }
    if let Some(wrap) = &args.wrap {
        map.insert("wrap".into(), json!(wrap));
    }
    if args.export_all {
        map.insert("exportAll".into(), json!(true));
    }
    match args.enclose.as_deref() {
        Some([]) => {
            map.insert("enclose".into(), json!(true));
        }
        Some(specs) => {
            map.insert("enclose".into(), json!(specs));
        }
        None => {}
    }
    if args.beautify {
        output.insert("beautify".into(), json!(true));
    }
    if let Some(preamble) = &args.preamble {
        output.insert("preamble".into(), json!(preamble));
    }
    if !output.is_empty() {
        map.insert("output".into(), Value::Object(output));
    }

    Value::Object(map)
}
