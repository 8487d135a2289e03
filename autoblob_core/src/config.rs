use crate::error::{AutoblobError, Result};
use crate::generator::IncludeSource;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::{debug, error, info, trace, warn};

/// Headers contributed by a single platform section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformSection {
    /// Appended after the common headers when this platform is selected
    #[serde(default)]
    pub headers: Vec<String>,
}

/// On-disk shape of an autoblob configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Headers included on every platform, in order
    #[serde(default)]
    pub headers: Vec<String>,
    /// Platform specific additions, keyed by platform name
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformSection>,
}

/// A loaded configuration: the resolved, ordered list of headers to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    headers: Vec<String>,
    source: PathBuf,
}

impl Configuration {
    /// Builds a configuration directly from a list of headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            source: PathBuf::from("<memory>"),
        }
    }

    /// Loads a configuration file.
    ///
    /// When `platform` is given, the headers of `[platforms.<name>]` are
    /// appended after the common `headers` list. Unknown platforms are an
    /// error; without a platform, platform sections are ignored.
    pub fn load(path: impl AsRef<Path>, platform: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {:?}", path);

        if !path.exists() {
            error!("Configuration file {:?} does not exist", path);
            return Err(AutoblobError::ConfigNotFound {
                path: absolute_or_given(path),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            AutoblobError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let mut config = Self::from_toml_str(&contents, platform)?;
        config.source = path.to_path_buf();
        Ok(config)
    }

    /// Parses configuration from an in-memory TOML document.
    pub fn from_toml_str(contents: &str, platform: Option<&str>) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            AutoblobError::from(e)
        })?;
        Self::resolve(file, platform)
    }

    fn resolve(file: ConfigFile, platform: Option<&str>) -> Result<Self> {
        let ConfigFile {
            mut headers,
            mut platforms,
        } = file;

        match platform {
            Some(name) => {
                let section = platforms.remove(name).ok_or_else(|| {
                    let known: Vec<&str> = platforms.keys().map(String::as_str).collect();
                    AutoblobError::config(format!(
                        "unknown platform '{}' (known platforms: [{}])",
                        name,
                        known.join(", ")
                    ))
                })?;
                debug!(
                    "Appending {} headers for platform '{}'",
                    section.headers.len(),
                    name
                );
                headers.extend(section.headers);
            }
            None if !platforms.is_empty() => {
                debug!(
                    "No platform selected, ignoring {} platform sections",
                    platforms.len()
                );
            }
            None => {}
        }

        let headers = headers
            .iter()
            .map(|header| {
                let resolved = substitute_env_vars(header)?;
                validate_include_path(&resolved)?;
                Ok(resolved)
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Configuration resolved to {} headers", headers.len());
        Ok(Self {
            headers,
            source: PathBuf::from("<memory>"),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Where this configuration was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl IncludeSource for Configuration {
    fn include_paths(&self) -> &[String] {
        &self.headers
    }
}

fn absolute_or_given(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Rejects entries that cannot be written inside a quoted include directive.
fn validate_include_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(AutoblobError::invalid_include_path(path, "empty header path"));
    }
    if path.contains('"') {
        return Err(AutoblobError::invalid_include_path(
            path,
            "contains a double quote",
        ));
    }
    if path.contains(['\n', '\r', '\0']) {
        return Err(AutoblobError::invalid_include_path(
            path,
            "contains a line break or NUL character",
        ));
    }
    Ok(())
}

/// Substitute environment variables in header entries.
/// Supports ${VAR_NAME:-default} syntax
fn substitute_env_vars(value: &str) -> Result<String> {
    trace!("Substituting environment variables in: {}", value);
    let mut result = String::with_capacity(value.len());
    let mut last_end = 0;

    let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .map_err(|e| AutoblobError::config(e.to_string()))?;

    for cap in re.captures_iter(value) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let var_name = &cap[1];
        let default_value = cap.get(2).map(|m| m.as_str());

        let replacement = match env::var(var_name) {
            Ok(val) => {
                debug!("Resolved environment variable: {}", var_name);
                val
            }
            Err(_) => match default_value {
                Some(default) => {
                    warn!(
                        "Environment variable {} not set, using default: {}",
                        var_name, default
                    );
                    default.to_string()
                }
                None => {
                    error!(
                        "Environment variable {} not set and no default provided",
                        var_name
                    );
                    return Err(AutoblobError::EnvVarNotSet(var_name.to_string()));
                }
            },
        };

        // Substituted values are never rescanned for placeholders.
        result.push_str(&value[last_end..full_match.start()]);
        result.push_str(&replacement);
        last_end = full_match.end();
    }
    result.push_str(&value[last_end..]);

    Ok(result)
}
