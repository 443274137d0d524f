use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::stats::StatKind;

/// The 25 natures. Each boosts one of the five non-HP stats by 10% and
/// hinders another by 10%; the five on the diagonal are neutral.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    pub fn boosted(&self) -> Option<StatKind> {
        use Nature::*;
        use StatKind::*;
        match self {
            Lonely | Brave | Adamant | Naughty => Some(Attack),
            Bold | Relaxed | Impish | Lax => Some(Defense),
            Timid | Hasty | Jolly | Naive => Some(Speed),
            Modest | Mild | Quiet | Rash => Some(SpecialAttack),
            Calm | Gentle | Sassy | Careful => Some(SpecialDefense),
            Hardy | Docile | Serious | Bashful | Quirky => None,
        }
    }

    pub fn hindered(&self) -> Option<StatKind> {
        use Nature::*;
        use StatKind::*;
        match self {
            Bold | Timid | Modest | Calm => Some(Attack),
            Lonely | Hasty | Mild | Gentle => Some(Defense),
            Brave | Relaxed | Quiet | Sassy => Some(Speed),
            Adamant | Impish | Jolly | Careful => Some(SpecialAttack),
            Naughty | Lax | Naive | Rash => Some(SpecialDefense),
            Hardy | Docile | Serious | Bashful | Quirky => None,
        }
    }

    /// Multiplier this nature applies to the given stat.
    pub fn multiplier(&self, stat: StatKind) -> f64 {
        if self.boosted() == Some(stat) {
            1.1
        } else if self.hindered() == Some(stat) {
            0.9
        } else {
            1.0
        }
    }
}
