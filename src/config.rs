// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration items and utilities

use crate::geom::Affine;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use thiserror::Error;

/// Configuration read/write/validation errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("initial_transform components must be finite")]
    NonFinite,

    #[error("initial_transform must preserve angles (d == a, c == -b)")]
    Skew,

    #[error("max_translation_y must be finite and non-negative")]
    InvalidClamp,

    #[cfg(feature = "json")]
    #[error("config (de)serialisation to JSON failed")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("config deserialisation from TOML failed")]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("config serialisation to TOML failed")]
    TomlSer(#[from] toml::ser::Error),

    #[error("error reading / writing config file")]
    IoError(#[from] std::io::Error),

    #[error("format not supported: {0}")]
    UnsupportedFormat(Format),
}

/// Configuration serialisation formats
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Error)]
pub enum Format {
    /// Not specified: guess from the path
    #[default]
    #[error("no format")]
    None,

    /// JavaScript Object Notation
    #[error("JSON")]
    Json,

    /// Tom's Obvious Minimal Language
    #[error("TOML")]
    Toml,

    /// Error: unable to guess format
    #[error("(unknown format)")]
    Unknown,
}

impl Format {
    /// Guess format from the path name
    ///
    /// This does not open the file.
    ///
    /// Potentially fallible: on error, returns [`Format::Unknown`].
    /// This may be due to unrecognised file extension or due to the required
    /// feature not being enabled.
    pub fn guess_from_path(path: &Path) -> Format {
        // use == since there is no OsStr literal
        if let Some(ext) = path.extension() {
            if ext == "json" {
                Format::Json
            } else if ext == "toml" {
                Format::Toml
            } else {
                Format::Unknown
            }
        } else {
            Format::Unknown
        }
    }

    /// Read from a path
    #[cfg(feature = "serde")]
    pub fn read_path<T: DeserializeOwned>(self, path: &Path) -> Result<T, Error> {
        log::info!("read_path: path={}, format={:?}", path.display(), self);
        match self {
            #[cfg(feature = "json")]
            Format::Json => {
                let r = std::io::BufReader::new(std::fs::File::open(path)?);
                Ok(serde_json::from_reader(r)?)
            }
            #[cfg(feature = "toml")]
            Format::Toml => {
                let contents = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&contents)?)
            }
            _ => Err(Error::UnsupportedFormat(self)),
        }
    }

    /// Write to a path
    #[cfg(feature = "serde")]
    pub fn write_path<T: Serialize>(self, path: &Path, value: &T) -> Result<(), Error> {
        log::info!("write_path: path={}, format={:?}", path.display(), self);
        match self {
            #[cfg(feature = "json")]
            Format::Json => {
                let w = std::io::BufWriter::new(std::fs::File::create(path)?);
                serde_json::to_writer_pretty(w, value)?;
                Ok(())
            }
            #[cfg(feature = "toml")]
            Format::Toml => {
                let contents = toml::to_string(value)?;
                std::fs::write(path, &contents)?;
                Ok(())
            }
            _ => {
                let _ = value;
                Err(Error::UnsupportedFormat(self))
            }
        }
    }
}

/// Recognizer set-up configuration
///
/// This is serializable (using `feature = "serde"`) with the following fields:
///
/// > `initial_transform`: `[f64; 6]` (matrix components `(a, b, c, d, tx, ty)`) \
/// > `max_translation_y`: optional `f32` (reference-space units)
///
/// Every field has a default value, thus may be omitted from serialized
/// configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanConfig {
    /// The accumulated transform before any gesture begins
    ///
    /// Must preserve angles: `d == a` and `c == -b`. Default: identity.
    #[cfg_attr(feature = "serde", serde(default = "defaults::initial_transform"))]
    pub initial_transform: [f64; 6],

    /// Upper bound on the accumulated transform's Y translation
    ///
    /// Default: no bound.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_translation_y: Option<f32>,
}

impl Default for PanConfig {
    fn default() -> Self {
        PanConfig {
            initial_transform: defaults::initial_transform(),
            max_translation_y: None,
        }
    }
}

impl PanConfig {
    /// Get the initial transform as an [`Affine`]
    pub fn initial_affine(&self) -> Result<Affine, Error> {
        if !self.initial_transform.iter().all(|x| x.is_finite()) {
            return Err(Error::NonFinite);
        }
        Affine::from_components(self.initial_transform).ok_or(Error::Skew)
    }

    /// Check all fields
    pub fn validate(&self) -> Result<(), Error> {
        self.initial_affine()?;
        if let Some(max) = self.max_translation_y {
            if !max.is_finite() || max < 0.0 {
                return Err(Error::InvalidClamp);
            }
        }
        Ok(())
    }

    /// Read and validate a configuration file, guessing the format from the
    /// path
    #[cfg(feature = "serde")]
    pub fn read_path(path: &Path) -> Result<Self, Error> {
        let config: PanConfig = Format::guess_from_path(path).read_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a configuration file, guessing the format from the path
    #[cfg(feature = "serde")]
    pub fn write_path(&self, path: &Path) -> Result<(), Error> {
        Format::guess_from_path(path).write_path(path, self)
    }
}

mod defaults {
    pub fn initial_transform() -> [f64; 6] {
        [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid_identity() {
        let config = PanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_affine().ok(), Some(Affine::IDENTITY));
    }

    #[test]
    fn validation_rejects_bad_fields() {
        let skew = PanConfig {
            initial_transform: [1.0, 0.0, 0.5, 1.0, 0.0, 0.0],
            ..Default::default()
        };
        assert!(matches!(skew.validate(), Err(Error::Skew)));

        let non_finite = PanConfig {
            initial_transform: [f64::NAN, 0.0, 0.0, f64::NAN, 0.0, 0.0],
            ..Default::default()
        };
        assert!(matches!(non_finite.validate(), Err(Error::NonFinite)));

        let clamp = PanConfig {
            max_translation_y: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(clamp.validate(), Err(Error::InvalidClamp)));
    }

    #[test]
    fn format_guessing() {
        assert_eq!(Format::guess_from_path(Path::new("a/b.json")), Format::Json);
        assert_eq!(Format::guess_from_path(Path::new("b.toml")), Format::Toml);
        assert_eq!(Format::guess_from_path(Path::new("b.yaml")), Format::Unknown);
        assert_eq!(Format::guess_from_path(Path::new("config")), Format::Unknown);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("touch-pan-config-test.json");

        let config = PanConfig {
            initial_transform: [2.0, 0.0, 0.0, 2.0, 5.0, -3.0],
            max_translation_y: Some(100.0),
        };
        config.write_path(&path).unwrap();
        let read = PanConfig::read_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(read, config);
    }

    #[cfg(feature = "json")]
    #[test]
    fn missing_fields_use_defaults() {
        let config: PanConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PanConfig::default());
    }
}
