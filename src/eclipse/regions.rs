// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coarse longitude bands used to list where an eclipse can be seen.
//!
//! This is a lookup, not a footprint: a region qualifies when the key
//! longitude (antisolar meridian for lunar eclipses, sub-solar meridian for
//! solar ones) falls inside its band or lies within 90° of the band centre.

use crate::angle::{normalize_degrees, normalize_signed_degrees};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    MiddleEast,
    Asia,
    AustraliaOceania,
    PacificOcean,
    AtlanticOcean,
    IndianOcean,
    Arctic,
    Antarctica,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Europe => "Europe",
            Region::Africa => "Africa",
            Region::MiddleEast => "Middle East",
            Region::Asia => "Asia",
            Region::AustraliaOceania => "Australia & Oceania",
            Region::PacificOcean => "Pacific Ocean",
            Region::AtlanticOcean => "Atlantic Ocean",
            Region::IndianOcean => "Indian Ocean",
            Region::Arctic => "Arctic",
            Region::Antarctica => "Antarctica",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// East longitudes `[west, east]`, degrees; `west > east` wraps through 0°.
struct Band {
    region: Region,
    west: f64,
    east: f64,
}

const fn band(region: Region, west: f64, east: f64) -> Band {
    Band { region, west, east }
}

const BANDS: [Band; 12] = [
    band(Region::NorthAmerica, 220.0, 300.0),
    band(Region::SouthAmerica, 280.0, 325.0),
    band(Region::Europe, 350.0, 40.0),
    band(Region::Africa, 340.0, 50.0),
    band(Region::MiddleEast, 25.0, 60.0),
    band(Region::Asia, 60.0, 150.0),
    band(Region::AustraliaOceania, 110.0, 180.0),
    band(Region::PacificOcean, 150.0, 240.0),
    band(Region::AtlanticOcean, 300.0, 20.0),
    band(Region::IndianOcean, 40.0, 110.0),
    band(Region::Arctic, 0.0, 360.0),
    band(Region::Antarctica, 0.0, 360.0),
];

impl Band {
    fn wraps(&self) -> bool {
        self.west > self.east
    }

    fn contains(&self, longitude: f64) -> bool {
        if self.wraps() {
            longitude >= self.west || longitude <= self.east
        } else {
            longitude >= self.west && longitude <= self.east
        }
    }

    fn centre(&self) -> f64 {
        if self.wraps() {
            normalize_degrees((self.west + self.east + 360.0) / 2.0)
        } else {
            (self.west + self.east) / 2.0
        }
    }
}

/// Regions facing a key longitude (degrees, any range).
pub fn visible_regions(key_longitude: f64) -> Vec<Region> {
    let key = normalize_degrees(key_longitude);
    BANDS
        .iter()
        .filter(|b| b.contains(key) || normalize_signed_degrees(b.centre() - key).abs() < 90.0)
        .map(|b| b.region)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_regions_always_listed() {
        for key in [0.0, 97.0, 181.0, -45.0] {
            let regions = visible_regions(key);
            assert!(regions.contains(&Region::Arctic));
            assert!(regions.contains(&Region::Antarctica));
        }
    }

    #[test]
    fn americas_face_west_longitudes() {
        let regions = visible_regions(-95.0);
        assert!(regions.contains(&Region::NorthAmerica));
        assert!(regions.contains(&Region::SouthAmerica));
        assert!(!regions.contains(&Region::Asia));
        assert!(!regions.contains(&Region::IndianOcean));
    }

    #[test]
    fn wrapped_bands() {
        let regions = visible_regions(5.0);
        assert!(regions.contains(&Region::Europe));
        assert!(regions.contains(&Region::Africa));
        assert!(regions.contains(&Region::AtlanticOcean));
        assert!(!regions.contains(&Region::PacificOcean));
        assert_eq!(Region::AustraliaOceania.to_string(), "Australia & Oceania");
    }
}
