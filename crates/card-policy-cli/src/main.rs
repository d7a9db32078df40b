// card-policy-cli/src/main.rs
// ============================================================================
// Module: Card Policy CLI Entry Point
// Description: Command dispatcher for serving and querying card eligibility.
// Purpose: Provide a safe CLI for the HTTP server and offline evaluation.
// Dependencies: clap, card-policy-core, card-policy-config, card-policy-server, tokio.
// ============================================================================

//! ## Overview
//! The `card-policy` binary starts the HTTP server, evaluates ad hoc card
//! snapshots, prints the rule catalog, and validates configuration files.
//! Inputs are untrusted and are parsed into closed enumerations before any
//! rule runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use card_policy_config::CardPolicyConfig;
use card_policy_core::Card;
use card_policy_core::CardAction;
use card_policy_core::CardStatus;
use card_policy_core::CardType;
use card_policy_core::EligibilityEvaluator;
use card_policy_core::RuleCatalog;
use card_policy_server::CardPolicyServer;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "card-policy", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the card policy HTTP server.
    Serve(ServeCommand),
    /// Evaluate a card snapshot and print the allowed actions.
    Evaluate(EvaluateCommand),
    /// Print every action with its eligibility rule.
    Catalog,
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to card-policy.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Card type (Prepaid, Debit, Credit).
    #[arg(long = "card-type", value_name = "TYPE")]
    card_type: CardType,
    /// Card status (Ordered, Inactive, Active, Restricted, Blocked, Expired, Closed).
    #[arg(long, value_name = "STATUS")]
    status: CardStatus,
    /// Whether a PIN has been provisioned.
    #[arg(long = "pin-set", action = ArgAction::SetTrue)]
    pin_set: bool,
    /// Card number echoed (masked) in the output.
    #[arg(long = "card-number", value_name = "NUMBER", default_value = "")]
    card_number: String,
    /// Optional action to test individually (for example ACTION6).
    #[arg(long, value_name = "ACTION")]
    action: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a card policy configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to card-policy.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// JSON report printed by `evaluate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationReport {
    /// Masked card number.
    card_number: String,
    /// Card type.
    card_type: CardType,
    /// Card status.
    card_status: CardStatus,
    /// Whether a PIN is set.
    is_pin_set: bool,
    /// Allowed actions in catalog order.
    allowed_actions: Vec<CardAction>,
    /// Number of allowed actions.
    actions_count: usize,
    /// Action tested individually, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<CardAction>,
    /// Whether the requested action is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    action_allowed: Option<bool>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("card-policy {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Evaluate(command) => command_evaluate(&command),
        Commands::Catalog => command_catalog(),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = CardPolicyConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let server = CardPolicyServer::from_config(&config)
        .map_err(|err| CliError::new(format!("failed to start server: {err}")))?;
    write_stderr_line(&format!("card-policy listening on http://{}", server.bind_addr()))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Evaluation Commands
// ============================================================================

/// Executes the `evaluate` command.
fn command_evaluate(command: &EvaluateCommand) -> CliResult<ExitCode> {
    let output = render_evaluation(command)?;
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Evaluates the requested snapshot and renders it as pretty JSON.
fn render_evaluation(command: &EvaluateCommand) -> CliResult<String> {
    let card = Card::new(
        command.card_number.as_str(),
        command.card_type,
        command.status,
        command.pin_set,
    );
    let evaluator = EligibilityEvaluator::standard();
    let eligibility =
        evaluator.evaluate(Some(&card)).map_err(|err| CliError::new(err.to_string()))?;
    let action = command
        .action
        .as_deref()
        .map(str::parse::<CardAction>)
        .transpose()
        .map_err(|err| CliError::new(err.to_string()))?;
    let action_allowed = action
        .map(|action| evaluator.is_action_allowed(&card, action))
        .transpose()
        .map_err(|err| CliError::new(err.to_string()))?;
    let report = EvaluationReport {
        card_number: card.card_number().masked(),
        card_type: card.card_type(),
        card_status: card.card_status(),
        is_pin_set: card.is_pin_set(),
        allowed_actions: eligibility.actions,
        actions_count: eligibility.count,
        action,
        action_allowed,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|err| CliError::new(format!("failed to render evaluation: {err}")))
}

/// Executes the `catalog` command.
fn command_catalog() -> CliResult<ExitCode> {
    let output = render_catalog(RuleCatalog::standard());
    write_stdout_line(output.trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders one line per catalog entry, in catalog order.
fn render_catalog(catalog: &RuleCatalog) -> String {
    let mut output = String::new();
    for entry in catalog.entries() {
        output.push_str(&format!("{:<9} {}\n", entry.action().as_str(), entry.summary()));
    }
    output
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = CardPolicyConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
