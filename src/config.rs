use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Startup settings, read from the environment.
///
/// * `DEBUG`: `true` enables debug visualizations.
/// * `OLDMAN_ASSETS`: directory containing the sprites.
/// * `OLDMAN_SCALE`: initial window size as a multiple of the screen size.
#[derive(Debug, PartialEq)]
pub(crate) struct Config {
    pub(crate) debug: bool,
    pub(crate) assets: PathBuf,
    pub(crate) scale: f64,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let debug = parse_or(&var, "DEBUG", defaults.debug);
        let assets = var("OLDMAN_ASSETS").map_or(defaults.assets, PathBuf::from);
        let scale = parse_or(&var, "OLDMAN_SCALE", defaults.scale);
        let scale = if scale > 0.0 {
            scale
        } else {
            warn!("Ignoring non-positive OLDMAN_SCALE={scale}");
            defaults.scale
        };

        Self {
            debug,
            assets,
            scale,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            assets: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
            scale: 2.0,
        }
    }
}

fn parse_or<F, T>(var: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(name) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable {name}={value}");
            default
        }),
        None => default,
    }
}
