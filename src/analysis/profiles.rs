//! Network profiles under which test batches are run

use std::fmt;

/// A simulated network condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetworkProfile {
    Slow3G,
    Good3G,
    Regular4G,
    Wifi,
}

impl NetworkProfile {
    /// All profiles, in panel order (top-left, top-right, bottom-left, bottom-right)
    pub const ALL: [NetworkProfile; 4] = [
        NetworkProfile::Slow3G,
        NetworkProfile::Good3G,
        NetworkProfile::Regular4G,
        NetworkProfile::Wifi,
    ];

    /// Key of this profile inside the results' `datas` object
    pub const fn key(self) -> &'static str {
        match self {
            NetworkProfile::Slow3G => "SLOW_3G",
            NetworkProfile::Good3G => "GOOD_3G",
            NetworkProfile::Regular4G => "REGULAR_4G",
            NetworkProfile::Wifi => "WIFI",
        }
    }

    pub const fn panel_title(self) -> &'static str {
        match self {
            NetworkProfile::Slow3G => "Slow 3G stream",
            NetworkProfile::Good3G => "Good 3G stream",
            NetworkProfile::Regular4G => "Regular 4G stream",
            NetworkProfile::Wifi => "Wifi stream",
        }
    }

    /// Index of this profile's panel in a row-major 2x2 grid
    pub const fn panel_index(self) -> usize {
        match self {
            NetworkProfile::Slow3G => 0,
            NetworkProfile::Good3G => 1,
            NetworkProfile::Regular4G => 2,
            NetworkProfile::Wifi => 3,
        }
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Scaled sample values for each network profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSeries {
    samples: [Vec<f64>; 4],
}

impl ProfileSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples recorded under `profile`, in test order
    pub fn get(&self, profile: NetworkProfile) -> &[f64] {
        &self.samples[profile.panel_index()]
    }

    pub fn set(&mut self, profile: NetworkProfile, samples: Vec<f64>) {
        self.samples[profile.panel_index()] = samples;
    }
}
