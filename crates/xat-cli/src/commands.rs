//! Command implementations

use crate::PrintFormat;
use colored::Colorize;
use inquire::{InquireError, MultiSelect};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use xat_core::plugin::optional_packages;
use xat_core::{
    ConfigFactory, ConfigLoader, FragmentSequence, Result, RuleEntry, RuleSeverity, XatConfigFile,
    XatError,
};

/// File written by `xat init`
pub const INIT_CONFIG_FILE: &str = "xat.config.json";

const FRAMEWORKS: &[&str] = &["react", "nextjs", "astro"];
const EXTRAS: &[&str] = &["formatters", "type-aware"];

async fn compose_from_config(config: Option<&Path>, editor: Option<bool>) -> Result<FragmentSequence> {
    let XatConfigFile {
        mut options,
        configs,
    } = ConfigLoader::load(config, None)?.unwrap_or_default();

    if editor.is_some() {
        options.is_in_editor = editor;
    }

    ConfigFactory::new(options).with_config(configs).build().await
}

/// Compose and print the configuration
pub async fn print_command(
    config: Option<&Path>,
    format: PrintFormat,
    editor: Option<bool>,
    names_only: bool,
) -> Result<()> {
    let sequence = compose_from_config(config, editor).await?;

    if names_only {
        for (index, fragment) in sequence.iter().enumerate() {
            let name = fragment.name.as_deref().unwrap_or("<anonymous>");
            println!("{:>3}  {}", index, name);
        }
        return Ok(());
    }

    let output = match format {
        PrintFormat::Json => serde_json::to_string_pretty(&sequence)
            .map_err(|e| XatError::internal_error(format!("Failed to serialize JSON: {e}")))?,
        PrintFormat::Yaml => serde_yaml::to_string(&sequence)
            .map_err(|e| XatError::internal_error(format!("Failed to serialize YAML: {e}")))?,
    };
    println!("{output}");
    Ok(())
}

/// Print the effective rule table for one file
pub async fn rules_command(config: Option<&Path>, file: &str) -> Result<()> {
    let sequence = compose_from_config(config, None).await?;
    let rules = sequence.effective_rules_for(file);

    if rules.is_empty() {
        println!("No rules apply to {}", file.bold());
        return Ok(());
    }

    println!("{} rules apply to {}\n", rules.len(), file.bold());
    for (id, entry) in &rules {
        println!("  {}  {}", severity_label(entry), id);
    }
    Ok(())
}

fn severity_label(entry: &RuleEntry) -> String {
    let label = match entry.severity {
        RuleSeverity::Error => "error".red().bold(),
        RuleSeverity::Warn => "warn ".yellow(),
        RuleSeverity::Off => "off  ".dimmed(),
    };
    if entry.autofix || !entry.is_active() {
        label.to_string()
    } else {
        format!("{label} {}", "(no autofix)".dimmed())
    }
}

/// Write a starter `xat.config.json`.
///
/// Refuses to touch an existing file unless `force` is set.
pub fn init_command(
    yes: bool,
    frameworks: Vec<String>,
    extra: Vec<String>,
    force: bool,
) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| XatError::io_error(".", e))?;
    let target = cwd.join(INIT_CONFIG_FILE);

    if target.exists() && !force {
        warn!("{} already exists, setup wizard exited.", INIT_CONFIG_FILE);
        eprintln!(
            "{}",
            format!("{INIT_CONFIG_FILE} already exists, setup wizard exited.").yellow()
        );
        return Err(XatError::config_error(format!(
            "'{}' already exists",
            target.display()
        )));
    }

    let skip_prompt = yes || std::env::var("SKIP_PROMPT").is_ok_and(|v| !v.is_empty());
    let Some(frameworks) =
        select("frameworks", "Select frameworks:", FRAMEWORKS, frameworks, skip_prompt)?
    else {
        return cancelled();
    };
    let Some(extra) = select("extra", "Select extra features:", EXTRAS, extra, skip_prompt)? else {
        return cancelled();
    };

    let options = starter_options(&frameworks, &extra);
    let content = serde_json::to_string_pretty(&json!({ "options": options }))
        .map_err(|e| XatError::internal_error(format!("Failed to serialize config: {e}")))?;
    fs::write(&target, format!("{content}\n")).map_err(|e| XatError::io_error(&target, e))?;
    info!("Wrote {}", target.display());

    println!("{} {}", "✓".green(), format!("Created {INIT_CONFIG_FILE}").bold());

    let packages: Vec<&str> = frameworks
        .iter()
        .map(String::as_str)
        .chain(extra.iter().map(String::as_str))
        .flat_map(optional_packages)
        .copied()
        .collect();
    if !packages.is_empty() {
        println!(
            "\nInstall the plugins these features need:\n  {}",
            format!("pnpm add -D {}", packages.join(" ")).cyan()
        );
    }
    Ok(())
}

fn cancelled() -> Result<()> {
    info!("Setup wizard cancelled");
    println!("{}", "Operation cancelled.".yellow());
    Ok(())
}

/// Validate choices given on the command line, or prompt when none were given.
///
/// Returns `None` when the prompt is cancelled.
fn select(
    flag: &str,
    message: &str,
    choices: &[&str],
    given: Vec<String>,
    skip_prompt: bool,
) -> Result<Option<Vec<String>>> {
    let given: Vec<String> = given
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(unknown) = given.iter().find(|g| !choices.contains(&g.as_str())) {
        return Err(XatError::usage_error(
            format!("--{flag}"),
            format!("'{unknown}' is not one of: {}", choices.join(", ")),
        ));
    }

    if !given.is_empty() || skip_prompt {
        return Ok(Some(given));
    }

    match MultiSelect::new(message, choices.to_vec()).prompt() {
        Ok(picked) => Ok(Some(picked.into_iter().map(str::to_string).collect())),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(prompt_error(flag, e)),
    }
}

fn prompt_error(flag: &str, error: InquireError) -> XatError {
    match error {
        InquireError::NotTTY => XatError::usage_error(
            format!("--{flag}"),
            "no terminal to prompt on; pass --yes or give the choices as flags",
        ),
        other => XatError::internal_error(format!("Prompt failed: {other}")),
    }
}

fn starter_options(frameworks: &[String], extra: &[String]) -> Map<String, Value> {
    let mut options = Map::new();
    for framework in FRAMEWORKS {
        if frameworks.iter().any(|f| f == framework) {
            options.insert(framework.to_string(), Value::Bool(true));
        }
    }

    let formatters = extra.iter().any(|e| e == "formatters");
    options.insert("formatters".to_string(), Value::Bool(formatters));

    if extra.iter().any(|e| e == "type-aware") {
        options.insert(
            "typescript".to_string(),
            json!({ "tsconfigPath": "tsconfig.json" }),
        );
    }
    options
}

/// Show version information
pub fn version_command() {
    println!("{} {}", xat_core::NAME.bold(), xat_core::VERSION);
}
