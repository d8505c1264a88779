//! Config command implementation.
//!
//! Manages CLI configuration settings. Stored values act as defaults for
//! every solve command.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use solveit_math::solvers::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use solveit_math::ErrorMode;

use crate::cli::OutputFormat;
use crate::commands::parse_number;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};
use crate::Context;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SOLVEIT_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Default convergence tolerance
    DefaultTolerance,
    /// Default iteration budget
    DefaultMaxIterations,
    /// Default error convention
    DefaultErrorMode,
    /// Precision for decimal output
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_tolerance" | "tolerance" | "tol" => Some(Self::DefaultTolerance),
            "default_max_iterations" | "max_iterations" | "niter" => {
                Some(Self::DefaultMaxIterations)
            }
            "default_error_mode" | "error_mode" => Some(Self::DefaultErrorMode),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultTolerance => "default_tolerance",
            Self::DefaultMaxIterations => "default_max_iterations",
            Self::DefaultErrorMode => "default_error_mode",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultTolerance => "Default tolerance (significant figures in that mode)",
            Self::DefaultMaxIterations => "Default maximum number of iterations",
            Self::DefaultErrorMode => "Default error (absolute, relative, significant-figures)",
            Self::DecimalPrecision => "Number of decimal places for output (2-16)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(self) -> String {
        match self {
            Self::DefaultFormat => "table".to_string(),
            Self::DefaultTolerance => format!("{DEFAULT_TOLERANCE:e}"),
            Self::DefaultMaxIterations => DEFAULT_MAX_ITERATIONS.to_string(),
            Self::DefaultErrorMode => ErrorMode::default().to_string(),
            Self::DecimalPrecision => "10".to_string(),
            Self::UseColors => "true".to_string(),
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultTolerance,
            Self::DefaultMaxIterations,
            Self::DefaultErrorMode,
            Self::DecimalPrecision,
            Self::UseColors,
        ]
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    fn load() -> CliResult<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            tracing::debug!("loaded configuration from {}", path.display());
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> CliResult<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Stored value, or the default.
    fn value(&self, key: ConfigKey) -> String {
        self.values
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Typed view of the configuration used by the solve commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub error_mode: ErrorMode,
    pub precision: usize,
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            error_mode: ErrorMode::default(),
            precision: 10,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Loads the configuration file, falling back to defaults for unset keys.
    pub fn load() -> CliResult<Self> {
        Self::from_config(&Config::load()?)
    }

    fn from_config(config: &Config) -> CliResult<Self> {
        let invalid = |key: ConfigKey, value: &str| {
            CliError::Config(format!(
                "stored value '{value}' for {} is invalid; run `solveit config reset {}`",
                key.as_str(),
                key.as_str()
            ))
        };

        let mut settings = Self::default();
        for &key in ConfigKey::all() {
            let value = config.value(key);
            validate_config_value(key, &value).map_err(|_| invalid(key, &value))?;
            match key {
                ConfigKey::DefaultFormat => {
                    settings.format =
                        OutputFormat::from_name(&value).ok_or_else(|| invalid(key, &value))?;
                }
                ConfigKey::DefaultTolerance => settings.tolerance = parse_number(&value)?,
                ConfigKey::DefaultMaxIterations => {
                    settings.max_iterations = value.parse().map_err(|_| invalid(key, &value))?;
                }
                ConfigKey::DefaultErrorMode => settings.error_mode = value.parse()?,
                ConfigKey::DecimalPrecision => {
                    settings.precision = value.parse().map_err(|_| invalid(key, &value))?;
                }
                ConfigKey::UseColors => settings.use_colors = parse_bool(&value),
            }
        }
        Ok(settings)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Get the config file path.
pub fn config_path() -> CliResult<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".into()))?;
    Ok(home.join("solveit").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx.format),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), config.value(*key)))
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: HashMap<&str, String> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let key = ConfigKey::from_str(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;
    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::from_str(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;

    validate_config_value(key, &args.value)?;

    let mut config = Config::load()?;
    config.set(key.as_str().to_string(), args.value.clone());
    config.save()?;

    if !ctx.quiet {
        print_success(&format!("Set {} = {}", key.as_str(), args.value));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(ctx: &Context) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Available Configuration Keys");
            }
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value().as_str()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    let mut config = Config::load()?;

    if args.all {
        config.clear();
        config.save()?;
        if !ctx.quiet {
            print_success("Reset all configuration to defaults");
        }
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::from_str(&key_str)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key_str))?;
        config.remove(key.as_str());
        config.save()?;
        if !ctx.quiet {
            print_success(&format!(
                "Reset {} to default ({})",
                key.as_str(),
                key.default_value()
            ));
        }
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::DefaultFormat => {
            if OutputFormat::from_name(value).is_none() {
                return Err(anyhow::anyhow!(
                    "Invalid format: {}. Use table, json, csv, or minimal.",
                    value
                ));
            }
        }
        ConfigKey::DefaultTolerance => {
            let tolerance = parse_number(value)?;
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(anyhow::anyhow!(
                    "Invalid tolerance: {}. Must be positive.",
                    value
                ));
            }
        }
        ConfigKey::DefaultMaxIterations => {
            let niter: usize = value.parse().map_err(|_| {
                anyhow::anyhow!("Invalid iteration count: {}. Must be a number.", value)
            })?;
            if niter == 0 {
                return Err(anyhow::anyhow!("Invalid iteration count: must be at least 1."));
            }
        }
        ConfigKey::DefaultErrorMode => {
            value.parse::<ErrorMode>()?;
        }
        ConfigKey::DecimalPrecision => {
            let precision: u32 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid precision: {}. Must be a number.", value))?;
            if !(2..=16).contains(&precision) {
                return Err(anyhow::anyhow!(
                    "Invalid precision: {}. Must be between 2 and 16.",
                    precision
                ));
            }
        }
        ConfigKey::UseColors => {
            if !["true", "false", "1", "0", "yes", "no"].contains(&value.to_lowercase().as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid boolean: {}. Use true or false.",
                    value
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        Config {
            values: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_config(&Config::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_stored_values() {
        let settings = Settings::from_config(&config(&[
            ("default_format", "json"),
            ("default_tolerance", "1e-3"),
            ("default_max_iterations", "25"),
            ("default_error_mode", "sig-figs"),
            ("use_colors", "no"),
        ]))
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert!((settings.tolerance - 1e-3).abs() < f64::EPSILON);
        assert_eq!(settings.max_iterations, 25);
        assert_eq!(settings.error_mode, ErrorMode::SignificantFigures);
        assert!(!settings.use_colors);
    }

    #[test]
    fn test_comma_tolerance() {
        let settings = Settings::from_config(&config(&[("default_tolerance", "0,001")])).unwrap();
        assert!((settings.tolerance - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_stored_value() {
        let err = Settings::from_config(&config(&[("decimal_precision", "99")])).unwrap_err();
        assert!(err.to_string().contains("decimal_precision"));
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(ConfigKey::from_str("tol"), Some(ConfigKey::DefaultTolerance));
        assert_eq!(ConfigKey::from_str("NITER"), Some(ConfigKey::DefaultMaxIterations));
        assert_eq!(ConfigKey::from_str("daycount"), None);
    }

    #[test]
    fn test_validate() {
        assert!(validate_config_value(ConfigKey::DefaultFormat, "CSV").is_ok());
        assert!(validate_config_value(ConfigKey::DefaultTolerance, "-1").is_err());
        assert!(validate_config_value(ConfigKey::DefaultMaxIterations, "0").is_err());
        assert!(validate_config_value(ConfigKey::DefaultErrorMode, "relative").is_ok());
        assert!(validate_config_value(ConfigKey::DefaultErrorMode, "bogus").is_err());
    }
}
