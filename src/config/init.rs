use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{
    get_config_path, save_config, validate_cutoff_days, Config, RepositoryConfig, SlackConfig,
};
use crate::stall::StallThresholds;

/// Line-based prompts over any reader/writer pair (stdin/stdout in the CLI)
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the wizard finished");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt with a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt until a non-empty answer is given
    fn prompt_required(&mut self, message: &str, what: &str) -> Result<String> {
        loop {
            let input = self.prompt(message)?;
            if !input.is_empty() {
                return Ok(input);
            }
            writeln!(self.output, "  {} is required.", what)?;
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    /// Prompt for a cutoff in days until a valid value is given
    fn prompt_days(&mut self, message: &str, default: i64) -> Result<i64> {
        loop {
            let input = self.prompt_with_default(message, &default.to_string())?;
            match input.parse::<i64>() {
                Ok(days) => match validate_cutoff_days(days) {
                    Ok(()) => return Ok(days),
                    Err(e) => writeln!(self.output, "  Invalid: {}. Try again.", e)?,
                },
                Err(_) => writeln!(self.output, "  Invalid: must be a whole number of days. Try again.")?,
            }
        }
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the suggested config file path.
/// Otherwise, suggests the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter {
        input: stdin.lock(),
        output: std::io::stdout(),
    };
    run_wizard(&mut prompter, default_path)
}

fn run_wizard<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    default_path: Option<PathBuf>,
) -> Result<()> {
    writeln!(prompter.output)?;
    writeln!(prompter.output, "Stalled PR Notifier Configuration")?;
    writeln!(prompter.output, "=================================")?;
    writeln!(prompter.output)?;

    // 1. Repository
    let full_name = loop {
        let input = prompter.prompt_required("GitHub repository (owner/name): ", "Repository")?;
        match input.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                break (owner.to_string(), name.to_string());
            }
            _ => writeln!(prompter.output, "  Invalid: expected 'owner/name'. Try again.")?,
        }
    };
    let repository = RepositoryConfig {
        owner: full_name.0,
        name: full_name.1,
    };

    // 2. Slack
    writeln!(prompter.output)?;
    let slack = if prompter.prompt_yes_no("Post reminders to Slack?", true)? {
        let channel = prompter.prompt_required("  Slack channel name or ID: ", "Channel")?;
        Some(SlackConfig { channel })
    } else {
        None
    };

    // 3. Thresholds
    writeln!(prompter.output)?;
    writeln!(
        prompter.output,
        "A PR is stalled when it was opened, or last updated, longer ago than these cutoffs."
    )?;
    let defaults = StallThresholds::default();
    let thresholds = StallThresholds {
        opened_cutoff_days: prompter.prompt_days("Opened cutoff (days)", defaults.opened_cutoff_days)?,
        update_cutoff_days: prompter.prompt_days("Update cutoff (days)", defaults.update_cutoff_days)?,
    };

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    writeln!(prompter.output)?;
    let path_str = prompter.prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompter.prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            writeln!(prompter.output, "Aborted.")?;
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        repository,
        slack,
        thresholds,
    };
    save_config(&config_path, &config)?;

    writeln!(prompter.output)?;
    writeln!(prompter.output, "Config written to {}", config_path.display())?;
    writeln!(
        prompter.output,
        "Run `stalled-pr-notifier check` to see stalled PRs, or schedule `stalled-pr-notifier notify`."
    )?;

    Ok(())
}
