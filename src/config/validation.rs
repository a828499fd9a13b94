use super::schema::Config;

/// Longest cutoff accepted, in days (about ten years)
pub const MAX_CUTOFF_DAYS: i64 = 3650;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.repository.owner.trim().is_empty() {
        errors.push("repository.owner: must not be empty".to_string());
    }
    if config.repository.name.trim().is_empty() {
        errors.push("repository.name: must not be empty".to_string());
    }
    if config.repository.name.contains('/') {
        errors.push(format!(
            "repository.name: '{}' must be the bare repo name, put the owner in repository.owner",
            config.repository.name
        ));
    }

    if let Some(ref slack) = config.slack {
        if slack.channel.trim().is_empty() {
            errors.push("slack.channel: must not be empty".to_string());
        }
    }

    let cutoffs = [
        ("thresholds.opened_cutoff_days", config.thresholds.opened_cutoff_days),
        ("thresholds.update_cutoff_days", config.thresholds.update_cutoff_days),
    ];
    for (field, days) in cutoffs {
        if let Err(e) = validate_cutoff_days(days) {
            errors.push(format!("{}: {}", field, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a single cutoff value (also used for command-line overrides)
pub fn validate_cutoff_days(days: i64) -> Result<(), String> {
    if !(0..=MAX_CUTOFF_DAYS).contains(&days) {
        return Err(format!(
            "must be between 0 and {} days, got {}",
            MAX_CUTOFF_DAYS, days
        ));
    }
    Ok(())
}
