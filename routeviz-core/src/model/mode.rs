use std::fmt;

use serde::{Deserialize, Serialize};

/// Means of travel a road may admit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bicycle,
    Pedestrian,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Car, TravelMode::Bicycle, TravelMode::Pedestrian];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Pedestrian => "pedestrian",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            TravelMode::Car => 0b001,
            TravelMode::Bicycle => 0b010,
            TravelMode::Pedestrian => 0b100,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compact set of travel modes allowed on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeSet(u8);

impl ModeSet {
    pub const EMPTY: ModeSet = ModeSet(0);

    pub fn contains(self, mode: TravelMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn insert(&mut self, mode: TravelMode) {
        self.0 |= mode.bit();
    }

    #[must_use]
    pub fn without(self, mode: TravelMode) -> Self {
        ModeSet(self.0 & !mode.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TravelMode> {
        TravelMode::ALL.into_iter().filter(move |mode| self.contains(*mode))
    }
}

impl FromIterator<TravelMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = TravelMode>>(iter: I) -> Self {
        let mut set = ModeSet::EMPTY;
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}
