use std::path::Path;

use loom_layout::SpaceConfig;
use loom_layout::diag::{Hint, HintedStrResult, StrResult, bail, eco_format};
use serde::{Deserialize, Serialize};

use crate::args::LayoutCommand;

/// Layout settings, as read from a configuration file.
///
/// All lengths are in columns of the monospace grid the CLI sets text on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// How far a space may shrink, relative to its natural width.
    pub space_shrink: f64,
    /// The natural width of a space.
    pub space_width: f64,
    /// How far a space may stretch, relative to its natural width.
    pub space_stretch: f64,
    /// The available line width, unless given on the command line.
    pub text_width: f64,
    /// The distance between lines, as a multiple of the line height.
    pub leading: f64,
}

impl Config {
    /// Loads the configuration file of a layout command, if any, and applies
    /// the command's overrides.
    pub fn resolve(command: &LayoutCommand) -> HintedStrResult<Self> {
        let mut config = match &command.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        let overrides = [
            (command.space_shrink, &mut config.space_shrink),
            (command.space_width, &mut config.space_width),
            (command.space_stretch, &mut config.space_stretch),
            (command.leading, &mut config.leading),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn load(path: &Path) -> HintedStrResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            eco_format!("failed to read configuration file {} ({err})", path.display())
        })?;
        Self::parse(&text)
            .map_err(|err| {
                eco_format!("failed to load configuration file {} ({err})", path.display())
            })
            .hint(
                "the known keys are space-shrink, space-width, space-stretch, \
                 text-width and leading",
            )
    }

    /// Parses a configuration from TOML.
    pub fn parse(text: &str) -> StrResult<Self> {
        toml::from_str(text).map_err(|err| eco_format!("{}", err.message()))
    }

    /// Checks that the settings make sense together.
    pub fn validate(&self) -> HintedStrResult<()> {
        let Self { space_shrink, space_width, space_stretch, .. } = *self;
        if !(0.0 <= space_shrink && space_shrink <= space_width && space_width <= space_stretch)
        {
            bail!(
                "invalid space elasticity: shrink {}, width {}, stretch {}",
                space_shrink,
                space_width,
                space_stretch;
                hint: "spaces must satisfy 0 <= space-shrink <= space-width <= space-stretch"
            );
        }

        check_width(self.text_width)?;

        if !self.leading.is_finite() || self.leading <= 0.0 {
            bail!("leading must be positive, found {}", self.leading);
        }

        Ok(())
    }

    /// The elasticity of spaces.
    pub fn space(&self) -> SpaceConfig {
        SpaceConfig {
            shrink: self.space_shrink,
            width: self.space_width,
            stretch: self.space_stretch,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let space = SpaceConfig::default();
        Self {
            space_shrink: space.shrink,
            space_width: space.width,
            space_stretch: space.stretch,
            text_width: 60.0,
            leading: 1.0,
        }
    }
}

/// Ensures that a line width is usable.
pub fn check_width(width: f64) -> HintedStrResult<()> {
    if !width.is_finite() || width <= 0.0 {
        bail!(
            "line width must be positive, found {}", width;
            hint: "widths are measured in columns"
        );
    }
    Ok(())
}
