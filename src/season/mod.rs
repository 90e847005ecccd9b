//! Seasonal color categories and their reference colors
//!
//! A season is picked from a 2x2 grid of warm/cool (b*) and light/dark (L*).
//! Each season also carries a canonical skin-tone reference used to confirm
//! the bucket and to report the nearest alternative.

pub mod classifier;

pub use classifier::{ClassificationResult, MetricComparison, SeasonClassifier};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::LabColor;
use crate::constants::season_references;
use crate::{AnalysisError, Result};

/// One of the four personal-color seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Warm and light
    Spring,
    /// Cool and light
    Summer,
    /// Warm and dark
    Autumn,
    /// Cool and dark
    Winter,
}

impl Season {
    /// All seasons in canonical order
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Season for a warm/light combination
    pub const fn from_traits(is_warm: bool, is_light: bool) -> Self {
        match (is_warm, is_light) {
            (true, true) => Season::Spring,
            (false, true) => Season::Summer,
            (true, false) => Season::Autumn,
            (false, false) => Season::Winter,
        }
    }

    pub const fn is_warm(self) -> bool {
        matches!(self, Season::Spring | Season::Autumn)
    }

    pub const fn is_light(self) -> bool {
        matches!(self, Season::Spring | Season::Summer)
    }

    /// Default reference color for this season
    pub const fn reference_lab(self) -> LabColor {
        match self {
            Season::Spring => LabColor::from_array(season_references::SPRING),
            Season::Summer => LabColor::from_array(season_references::SUMMER),
            Season::Autumn => LabColor::from_array(season_references::AUTUMN),
            Season::Winter => LabColor::from_array(season_references::WINTER),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference Lab color per season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonReferences {
    pub spring: LabColor,
    pub summer: LabColor,
    pub autumn: LabColor,
    pub winter: LabColor,
}

impl Default for SeasonReferences {
    fn default() -> Self {
        Self {
            spring: Season::Spring.reference_lab(),
            summer: Season::Summer.reference_lab(),
            autumn: Season::Autumn.reference_lab(),
            winter: Season::Winter.reference_lab(),
        }
    }
}

impl SeasonReferences {
    pub fn get(&self, season: Season) -> LabColor {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Autumn => self.autumn,
            Season::Winter => self.winter,
        }
    }

    pub fn set(&mut self, season: Season, lab: LabColor) {
        match season {
            Season::Spring => self.spring = lab,
            Season::Summer => self.summer = lab,
            Season::Autumn => self.autumn = lab,
            Season::Winter => self.winter = lab,
        }
    }

    /// Iterate `(season, reference)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Season, LabColor)> + '_ {
        Season::ALL.into_iter().map(move |season| (season, self.get(season)))
    }

    /// Check that every reference is finite
    pub fn validate(&self) -> Result<()> {
        for (season, lab) in self.iter() {
            if !(lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite()) {
                return Err(AnalysisError::invalid_config(format!(
                    "reference for {} is not finite",
                    season
                )));
            }
        }
        Ok(())
    }
}
