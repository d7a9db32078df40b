// card-policy-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and command rendering.
// Purpose: Ensure CLI inputs parse into closed enumerations and render stably.
// Dependencies: card-policy-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap argument parsing, evaluation output, catalog rendering, and
//! config validation through the CLI helpers.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use card_policy_core::CardStatus;
use card_policy_core::CardType;
use card_policy_core::RuleCatalog;
use clap::Parser;
use serde_json::Value;
use serde_json::json;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::ConfigValidateCommand;
use super::EvaluateCommand;
use super::command_config_validate;
use super::render_catalog;
use super::render_evaluation;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn parse_evaluate(args: &[&str]) -> EvaluateCommand {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments parse");
    match cli.command {
        Some(Commands::Evaluate(command)) => command,
        other => panic!("expected evaluate command, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Parsing Tests
// ============================================================================

#[test]
fn evaluate_arguments_parse_case_insensitively() {
    let command = parse_evaluate(&[
        "card-policy",
        "evaluate",
        "--card-type",
        "credit",
        "--status",
        "BLOCKED",
        "--pin-set",
    ]);
    assert_eq!(command.card_type, CardType::Credit);
    assert_eq!(command.status, CardStatus::Blocked);
    assert!(command.pin_set);
    assert!(command.action.is_none());
}

#[test]
fn evaluate_rejects_unknown_status() {
    let result = Cli::try_parse_from([
        "card-policy",
        "evaluate",
        "--card-type",
        "Debit",
        "--status",
        "Frozen",
    ]);
    assert!(result.is_err());
}

#[test]
fn version_flag_parses_without_subcommand() {
    let cli = Cli::try_parse_from(["card-policy", "--version"]).expect("arguments parse");
    assert!(cli.show_version);
    assert!(cli.command.is_none());
}

#[test]
fn config_validate_accepts_path() {
    let cli = Cli::try_parse_from(["card-policy", "config", "validate", "--config", "x.toml"])
        .expect("arguments parse");
    match cli.command {
        Some(Commands::Config {
            command: ConfigCommand::Validate(command),
        }) => assert_eq!(command.config.as_deref(), Some(std::path::Path::new("x.toml"))),
        other => panic!("expected config validate, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Rendering Tests
// ============================================================================

#[test]
fn render_evaluation_reports_allowed_actions() {
    let command = parse_evaluate(&[
        "card-policy",
        "evaluate",
        "--card-type",
        "Debit",
        "--status",
        "Restricted",
        "--card-number",
        "4111111111111111",
        "--action",
        "ACTION1",
    ]);
    let output = render_evaluation(&command).expect("evaluation renders");
    let value: Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(
        value,
        json!({
            "cardNumber": "************1111",
            "cardType": "Debit",
            "cardStatus": "Restricted",
            "isPinSet": false,
            "allowedActions": ["ACTION3", "ACTION4", "ACTION9"],
            "actionsCount": 3,
            "action": "ACTION1",
            "actionAllowed": false
        })
    );
}

#[test]
fn render_evaluation_rejects_unknown_action() {
    let command = parse_evaluate(&[
        "card-policy",
        "evaluate",
        "--card-type",
        "Prepaid",
        "--status",
        "Active",
        "--action",
        "ACTION42",
    ]);
    let err = render_evaluation(&command).expect_err("unknown action");
    assert_eq!(err.to_string(), "unknown card action: ACTION42");
}

#[test]
fn render_catalog_lists_every_action_in_order() {
    let output = render_catalog(RuleCatalog::standard());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "ACTION1   status is Active");
    assert!(lines[4].starts_with("ACTION5 "));
    assert!(lines[12].starts_with("ACTION13 "));
}

// ============================================================================
// SECTION: Config Tests
// ============================================================================

#[test]
fn config_validate_reports_invalid_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("card-policy.toml");
    fs::write(&path, "[server]\nmax_body_bytes = 0\n").expect("write config");
    let command = ConfigValidateCommand {
        config: Some(path),
    };
    let err = command_config_validate(&command).expect_err("invalid config");
    assert!(err.to_string().contains("max_body_bytes must be greater than zero"));
}
