use anyhow::{bail, Context, Result};

use crate::export::{ExportSettings, PageFormat};

/// Application configuration loaded from environment variables.
/// Every variable is optional; a present but invalid value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Undo steps kept per session.
    pub history_limit: usize,
    pub export: ExportSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ExportSettings::default();

        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let history_limit = parse_or(&lookup, "HISTORY_LIMIT", 100usize)?;
        let reference_width_px = parse_or(&lookup, "EXPORT_REFERENCE_WIDTH", defaults.reference_width_px)?;
        let upscale = parse_or(&lookup, "EXPORT_UPSCALE", defaults.upscale)?;
        let page = parse_or(&lookup, "EXPORT_PAGE_FORMAT", PageFormat::default())?;

        if reference_width_px == 0 {
            bail!("EXPORT_REFERENCE_WIDTH must be greater than zero");
        }
        if !upscale.is_finite() || upscale <= 0.0 {
            bail!("EXPORT_UPSCALE must be a positive number");
        }

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            history_limit,
            export: ExportSettings {
                reference_width_px,
                upscale,
                page,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
