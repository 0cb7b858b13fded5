//! Config subcommand handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use lmsync_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SetKeyArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }
        ConfigCommand::SetKey(set_key) => handle_set_key(set_key, global),
    }
}

/// Format config for display, masking the access key.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "company = \"{}\"", p.company);
        let _ = writeln!(out, "access_id = \"{}\"", p.access_id);
        if p.access_key.is_some() {
            let _ = writeln!(out, "access_key = \"****\"");
        }
        if let Some(ref env) = p.access_key_env {
            let _ = writeln!(out, "access_key_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(ref codes) = p.duplicate_error_codes {
            let _ = writeln!(out, "duplicate_error_codes = {codes:?}");
        }
    }

    out
}

/// Read an access key from stdin and store it in the system keyring.
fn handle_set_key(args: &SetKeyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if io::stdin().is_terminal() && !global.quiet {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "Access key: ");
        let _ = stderr.flush();
    }

    let mut key = String::new();
    io::stdin().lock().read_line(&mut key)?;
    let key = key.trim_end_matches(['\r', '\n']);
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "access-key".into(),
            reason: "must not be empty".into(),
        });
    }

    let entry = keyring::Entry::new("lmsync", &format!("{}/access-key", args.profile))
        .map_err(|e| CliError::Config(format!("keyring unavailable: {e}")))?;
    entry
        .set_password(key)
        .map_err(|e| CliError::Config(format!("keyring store failed: {e}")))?;

    output::print_output(
        &format!("Stored access key for profile '{}'", args.profile),
        global.quiet,
    );
    Ok(())
}
