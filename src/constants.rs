//! Pipeline-wide constants.
//!
//! Centralizes the well-known key names, default values and interpreter limits
//! so the pipeline stages and their tests agree on them.

// ============================================================================
// Expression Tokens
// ============================================================================

/// Sentinel string that materializes to the built-in peso formatter
pub const CURRENCY_MXN_TOKEN: &str = "currency_mxn";

/// Prefix marking a function-definition expression
pub const FUNCTION_KEYWORD: &str = "function";

/// Marker of an arrow-function expression
pub const ARROW_MARKER: &str = "=>";

/// Key used when serializing a callable for inspection
pub const CALLABLE_TAG: &str = "$callable";

// ============================================================================
// Interpreter Limits
// ============================================================================

/// Maximum evaluation steps for a single formatter call
pub const MAX_EVAL_STEPS: usize = 10_000;

/// Maximum nesting depth accepted by the expression parser
pub const MAX_PARSE_DEPTH: usize = 64;

/// Maximum number of tokens in one formatter definition
pub const MAX_EXPR_TOKENS: usize = 1024;

/// Maximum length of a string produced inside a formatter
pub const MAX_STRING_LEN: usize = 64 * 1024;

// ============================================================================
// Callback Conventions
// ============================================================================

/// Keys that always hold a callable in chart options
pub const DEFAULT_CALLBACK_KEYS: &[&str] = &["formatter", "custom"];

/// Key prefixes that mark event handlers
pub const DEFAULT_CALLBACK_PREFIXES: &[&str] = &["on"];

/// Name of the root segment in diagnostic paths
pub const ROOT_PATH: &str = "root";

// ============================================================================
// Toolbar Defaults
// ============================================================================

/// Default filename for every export format
pub const DEFAULT_EXPORT_FILENAME: &str = "mtcenter-ventas";

/// Export formats that always get a default entry
pub const EXPORT_FORMATS: &[&str] = &["csv", "svg", "png"];

/// Interactive tools forced on by the toolbar merger
pub const TOOLBAR_TOOLS: &[&str] = &[
    "download",
    "selection",
    "zoom",
    "zoomin",
    "zoomout",
    "pan",
    "reset",
];

// ============================================================================
// Rendering
// ============================================================================

/// Chart type used when neither the payload nor its options name one
pub const DEFAULT_CHART_TYPE: &str = "line";

/// Tag wrapping a chart payload inside answer text
pub const DEFAULT_CHART_TAG: &str = "chart";

// ============================================================================
// Settings
// ============================================================================

/// Directory name under the platform config dir
pub const SETTINGS_DIR_NAME: &str = "answerviz";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";
