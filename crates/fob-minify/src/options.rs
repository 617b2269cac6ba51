//! Options recognized by the transform.
//!
//! The serialized shape follows the JavaScript-style configuration this
//! kind of plugin is usually driven by: camelCase top-level keys, passes
//! that are switched off with `false` and configured with an object.
//!
//! ```
//! use fob_minify::MinifyOptions;
//! use serde_json::json;
//!
//! let options = MinifyOptions::from_value(json!({
//!     "mangle": false,
//!     "compress": {},
//!     "outSourceMap": true,
//!     "enclose": ["window:w"]
//! }))
//! .unwrap();
//!
//! assert!(!options.mangle.is_enabled());
//! assert!(options.compress.is_enabled());
//! ```

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// An optional pass that is on unless explicitly disabled.
///
/// Deserializes from `false`/`null` (disabled), `true` (enabled with
/// defaults) or an options object (enabled, configured). An empty object
/// enables the pass with default sub-options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pass<T> {
    Disabled,
    Enabled(T),
}

impl<T> Pass<T> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Pass::Enabled(_))
    }

    pub fn as_enabled(&self) -> Option<&T> {
        match self {
            Pass::Enabled(options) => Some(options),
            Pass::Disabled => None,
        }
    }
}

impl<T: Default> Default for Pass<T> {
    fn default() -> Self {
        Pass::Enabled(T::default())
    }
}

impl<T: Default> From<bool> for Pass<T> {
    fn from(enabled: bool) -> Self {
        if enabled {
            Pass::Enabled(T::default())
        } else {
            Pass::Disabled
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PassRepr<T> {
    Flag(bool),
    Null(()),
    Options(T),
}

impl<'de, T> Deserialize<'de> for Pass<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match PassRepr::<T>::deserialize(deserializer)? {
            PassRepr::Flag(enabled) => Pass::from(enabled),
            PassRepr::Null(()) => Pass::Disabled,
            PassRepr::Options(options) => Pass::Enabled(options),
        })
    }
}

impl<T: Serialize> Serialize for Pass<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Pass::Disabled => serializer.serialize_bool(false),
            Pass::Enabled(options) => options.serialize(serializer),
        }
    }
}

/// Compression pass settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// Report dropped code. Accepted for compatibility; the oxc engine has no
    /// warning channel and only logs that it was requested.
    pub warnings: bool,
    /// Remove `console.*` calls.
    pub drop_console: bool,
    /// Remove `debugger` statements.
    pub drop_debugger: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            warnings: false,
            drop_console: false,
            drop_debugger: true,
        }
    }
}

/// Identifier renaming settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangleOptions {
    /// Also rename bindings declared in the top-level scope.
    pub toplevel: bool,
}

/// Printing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Pretty-print instead of emitting minified text.
    pub beautify: bool,
    /// Prefer single quotes for string literals.
    pub single_quotes: bool,
    /// Text emitted verbatim before the code, on its own line(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    /// Embed the original sources as `sourcesContent` in the source map.
    pub source_map_include_sources: bool,
}

/// Where the source map goes, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceMapTarget {
    #[default]
    Disabled,
    /// `<output filename>.map`
    Derived,
    /// Explicit map filename or path, relative to the output base.
    Named(String),
}

impl SourceMapTarget {
    /// Resolve the map filename for the given output filename.
    pub fn resolve(&self, filename: &str) -> Option<String> {
        match self {
            SourceMapTarget::Disabled => None,
            SourceMapTarget::Derived => Some(format!("{filename}.map")),
            SourceMapTarget::Named(name) => Some(name.clone()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, SourceMapTarget::Disabled)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceMapRepr {
    Flag(bool),
    Null(()),
    Name(String),
}

impl<'de> Deserialize<'de> for SourceMapTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match SourceMapRepr::deserialize(deserializer)? {
            SourceMapRepr::Flag(true) => SourceMapTarget::Derived,
            SourceMapRepr::Flag(false) | SourceMapRepr::Null(()) => SourceMapTarget::Disabled,
            SourceMapRepr::Name(name) if name.is_empty() => SourceMapTarget::Disabled,
            SourceMapRepr::Name(name) => SourceMapTarget::Named(name),
        })
    }
}

impl Serialize for SourceMapTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SourceMapTarget::Disabled => serializer.serialize_bool(false),
            SourceMapTarget::Derived => serializer.serialize_bool(true),
            SourceMapTarget::Named(name) => serializer.serialize_str(name),
        }
    }
}

/// Closure-enclose configuration as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Enclose {
    /// `true` encloses without parameters, `false` disables.
    Flag(bool),
    /// A single `"arg:param"` spec.
    Single(String),
    /// Several `"arg:param"` specs.
    List(Vec<String>),
    /// `{ arg: param }` pairs, in declaration order.
    Pairs(IndexMap<String, String>),
}

impl Enclose {
    /// Normalize into a parameter list; `None` when enclosing is disabled.
    pub fn arguments(&self) -> Option<Vec<EncloseArg>> {
        match self {
            Enclose::Flag(false) => None,
            Enclose::Flag(true) => Some(Vec::new()),
            Enclose::Single(spec) => Some(vec![EncloseArg::parse(spec)]),
            Enclose::List(specs) => Some(specs.iter().map(|s| EncloseArg::parse(s)).collect()),
            Enclose::Pairs(pairs) => Some(
                pairs
                    .iter()
                    .map(|(argument, parameter)| EncloseArg::new(argument, parameter))
                    .collect(),
            ),
        }
    }
}

/// One closure argument bound to one closure parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncloseArg {
    /// Expression passed at the call site.
    pub argument: String,
    /// Parameter name inside the closure.
    pub parameter: String,
}

impl EncloseArg {
    pub fn new(argument: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            parameter: parameter.into(),
        }
    }

    /// Split `"arg:param"` at the last colon. Without a colon the argument is
    /// passed under its own name.
    pub fn parse(spec: &str) -> Self {
        match spec.rsplit_once(':') {
            Some((argument, parameter)) => Self::new(argument, parameter),
            None => Self::new(spec, spec),
        }
    }
}

/// All options recognized by the transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyOptions {
    pub compress: Pass<CompressOptions>,
    pub mangle: Pass<MangleOptions>,
    pub output: OutputOptions,
    pub out_source_map: SourceMapTarget,
    /// Root for the source paths recorded in the map. Relative values are
    /// resolved against the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,
    /// Module name for the CommonJS-compatible wrapper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<String>,
    /// Export every top-level binding when wrapping.
    #[serde(alias = "export_all")]
    pub export_all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclose: Option<Enclose>,
}

impl MinifyOptions {
    /// Create from a JSON value (programmatic configuration).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn with_compress(mut self, compress: impl Into<Pass<CompressOptions>>) -> Self {
        self.compress = compress.into();
        self
    }

    pub fn with_mangle(mut self, mangle: impl Into<Pass<MangleOptions>>) -> Self {
        self.mangle = mangle.into();
        self
    }

    pub fn with_source_map(mut self, target: SourceMapTarget) -> Self {
        self.out_source_map = target;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_wrap(mut self, name: impl Into<String>, export_all: bool) -> Self {
        self.wrap = Some(name.into());
        self.export_all = export_all;
        self
    }

    pub fn with_enclose(mut self, enclose: Enclose) -> Self {
        self.enclose = Some(enclose);
        self
    }

    /// Wrapper module name, ignoring empty strings.
    pub fn wrap_name(&self) -> Option<&str> {
        self.wrap.as_deref().filter(|name| !name.is_empty())
    }

    /// Normalized enclose arguments; `None` when enclosing is off.
    pub fn enclose_arguments(&self) -> Option<Vec<EncloseArg>> {
        self.enclose.as_ref().and_then(Enclose::arguments)
    }
}

impl From<CompressOptions> for Pass<CompressOptions> {
    fn from(options: CompressOptions) -> Self {
        Pass::Enabled(options)
    }
}

impl From<MangleOptions> for Pass<MangleOptions> {
    fn from(options: MangleOptions) -> Self {
        Pass::Enabled(options)
    }
}
