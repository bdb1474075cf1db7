//! Note durations: class index, dotting and tuplet division

use serde::{Deserialize, Serialize};

/// Ticks per quarter note in the song model
pub const QUARTER_TIME: u32 = 960;

/// Highest valid duration class index (64th)
pub const MAX_DURATION_INDEX: u8 = 6;

/// Tuplet ratio: `enters` notes in the time of `times`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivisionType {
    pub enters: u32,
    pub times: u32,
}

impl DivisionType {
    pub const NORMAL: DivisionType = DivisionType { enters: 1, times: 1 };
    pub const TRIPLET: DivisionType = DivisionType { enters: 3, times: 2 };

    pub fn new(enters: u32, times: u32) -> Self {
        Self { enters, times }
    }

    /// True for the 1/1 ratio, which never produces a time-modification
    pub fn is_normal(&self) -> bool {
        *self == Self::NORMAL
    }

    /// Scale a tick value by this ratio (`ticks * times / enters`)
    ///
    /// `None` for a zero term or a product past the tick range.
    pub fn apply(&self, ticks: u32) -> Option<u32> {
        if self.enters == 0 || self.times == 0 {
            return None;
        }
        Some(ticks.checked_mul(self.times)? / self.enters)
    }
}

impl Default for DivisionType {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Dot augmentation; single and double dotting are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dotting {
    #[default]
    None,
    Dotted,
    DoubleDotted,
}

impl Dotting {
    pub fn dot_count(&self) -> u8 {
        match self {
            Dotting::None => 0,
            Dotting::Dotted => 1,
            Dotting::DoubleDotted => 2,
        }
    }

    /// Number of dots as written
    pub fn from_count(dots: u8) -> Self {
        match dots {
            0 => Dotting::None,
            1 => Dotting::Dotted,
            _ => Dotting::DoubleDotted,
        }
    }

    /// Add the dot augmentation to an undotted tick value
    pub fn apply(&self, ticks: u32) -> Option<u32> {
        match self {
            Dotting::None => Some(ticks),
            Dotting::Dotted => ticks.checked_add(ticks / 2),
            Dotting::DoubleDotted => ticks.checked_add((ticks / 4) * 3),
        }
    }
}

/// Duration of a voice
///
/// `index` is the duration class: 0 = whole, 1 = half, 2 = quarter,
/// 3 = eighth, 4 = 16th, 5 = 32nd, 6 = 64th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Duration {
    pub index: u8,
    #[serde(default)]
    pub dotting: Dotting,
    #[serde(default)]
    pub division: DivisionType,
}

impl Duration {
    pub const WHOLE: u8 = 0;
    pub const HALF: u8 = 1;
    pub const QUARTER: u8 = 2;
    pub const EIGHTH: u8 = 3;
    pub const SIXTEENTH: u8 = 4;
    pub const THIRTY_SECOND: u8 = 5;
    pub const SIXTY_FOURTH: u8 = 6;

    pub fn new(index: u8) -> Self {
        Self {
            index,
            dotting: Dotting::None,
            division: DivisionType::NORMAL,
        }
    }

    pub fn dotted(mut self) -> Self {
        self.dotting = Dotting::Dotted;
        self
    }

    pub fn double_dotted(mut self) -> Self {
        self.dotting = Dotting::DoubleDotted;
        self
    }

    pub fn with_division(mut self, division: DivisionType) -> Self {
        self.division = division;
        self
    }

    /// Undotted, undivided ticks of the duration class at `unit` ticks per quarter
    pub fn base_ticks(index: u8, unit: u32) -> Option<u32> {
        if index > MAX_DURATION_INDEX {
            return None;
        }
        Some(unit.checked_mul(4)? >> index)
    }

    /// Full length in ticks at `unit` ticks per quarter.
    ///
    /// Division is applied before dotting. Returns `None` for an
    /// out-of-range class, a division ratio with a zero term, or a length
    /// that does not fit in `u32`.
    pub fn ticks(&self, unit: u32) -> Option<u32> {
        let base = Self::base_ticks(self.index, unit)?;
        let divided = self.division.apply(base)?;
        self.dotting.apply(divided)
    }

    /// Length in song-model ticks
    pub fn time(&self) -> Option<u32> {
        self.ticks(QUARTER_TIME)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::new(Self::QUARTER)
    }
}
