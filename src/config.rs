use crate::error::ForcesError;
use crate::forces::Reference;
use crate::loader::DuplicatePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Analysis configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Loading and scaling options.
    pub analysis: Analysis,
    /// Reference quantities for force coefficients.
    pub reference: Reference,
}

/// Options applied when constructing [`crate::forces::Forces`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Analysis {
    /// Divisor of the time axis.
    pub scale_time: f64,
    /// Divisor of every force component.
    pub scale_forces: f64,
    /// Compute raw averages right after loading.
    pub average: bool,
    /// Spectral analysis (not available).
    pub fft: bool,
    /// Report progress at info level.
    pub verbose: bool,
    /// Handling of repeated timestamps across restart directories.
    pub duplicates: DuplicatePolicy,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            scale_time: 1.0,
            scale_forces: 1.0,
            average: false,
            fft: false,
            verbose: false,
            duplicates: DuplicatePolicy::Keep,
        }
    }
}

impl Analysis {
    /// Check the options before any file is read.
    ///
    /// # Errors
    /// Returns [`ForcesError::InvalidScale`] for a non-positive scale and
    /// [`ForcesError::NotImplemented`] if `fft` is requested.
    pub fn validate(&self) -> crate::error::Result<()> {
        check_pos("scale_time", self.scale_time)?;
        check_pos("scale_forces", self.scale_forces)?;
        if self.fft {
            return Err(ForcesError::NotImplemented("FFT analysis"));
        }
        Ok(())
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded; missing sections and keys take their defaults.
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.analysis
            .validate()
            .context("invalid analysis options")?;

        check_pos("rho", self.reference.rho).context("invalid reference density")?;
        check_pos("velocity", self.reference.velocity).context("invalid reference velocity")?;
        check_pos("area", self.reference.area).context("invalid reference area")?;

        Ok(())
    }
}

pub(crate) fn check_pos(name: &'static str, value: f64) -> crate::error::Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ForcesError::InvalidScale { name, value });
    }
    Ok(())
}
