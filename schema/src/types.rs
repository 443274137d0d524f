use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Elemental types. The chart below is the classic 17-type matchup table
/// (pre-fairy).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
}

/// Multiplier for a single attacking type against a single defending type.
pub fn effectiveness(attacking: Type, defending: Type) -> f64 {
    use Type::*;
    let (double, half, none): (&[Type], &[Type], &[Type]) = match attacking {
        Normal => (&[], &[Rock, Steel], &[Ghost]),
        Fighting => (
            &[Normal, Rock, Steel, Ice, Dark],
            &[Flying, Poison, Bug, Psychic],
            &[Ghost],
        ),
        Flying => (&[Fighting, Bug, Grass], &[Rock, Steel, Electric], &[]),
        Poison => (&[Grass], &[Poison, Ground, Rock, Ghost], &[Steel]),
        Ground => (
            &[Poison, Rock, Steel, Fire, Electric],
            &[Bug, Grass],
            &[Flying],
        ),
        Rock => (&[Flying, Bug, Fire, Ice], &[Fighting, Ground, Steel], &[]),
        Bug => (
            &[Grass, Psychic, Dark],
            &[Fighting, Flying, Poison, Ghost, Steel, Fire],
            &[],
        ),
        Ghost => (&[Ghost, Psychic], &[Steel, Dark], &[Normal]),
        Steel => (&[Rock, Ice], &[Steel, Fire, Water, Electric], &[]),
        Fire => (&[Bug, Steel, Grass, Ice], &[Rock, Fire, Water, Dragon], &[]),
        Water => (&[Ground, Rock, Fire], &[Water, Grass, Dragon], &[]),
        Grass => (
            &[Ground, Rock, Water],
            &[Flying, Poison, Bug, Steel, Fire, Grass, Dragon],
            &[],
        ),
        Electric => (&[Flying, Water], &[Grass, Electric, Dragon], &[Ground]),
        Psychic => (&[Fighting, Poison], &[Steel, Psychic], &[Dark]),
        Ice => (
            &[Flying, Ground, Grass, Dragon],
            &[Steel, Fire, Water, Ice],
            &[],
        ),
        Dragon => (&[Dragon], &[Steel], &[]),
        Dark => (&[Ghost, Psychic], &[Fighting, Dark, Steel], &[]),
    };

    if none.contains(&defending) {
        0.0
    } else if double.contains(&defending) {
        2.0
    } else if half.contains(&defending) {
        0.5
    } else {
        1.0
    }
}

/// Combined multiplier against a possibly dual-typed defender.
pub fn dual_effectiveness(attacking: Type, defending: (Type, Option<Type>)) -> f64 {
    let mut product = effectiveness(attacking, defending.0);
    if let Some(second) = defending.1 {
        product *= effectiveness(attacking, second);
    }
    product
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_cannot_touch_flying() {
        assert_eq!(effectiveness(Type::Ground, Type::Flying), 0.0);
    }

    #[test]
    fn dual_typing_multiplies() {
        // Fire vs grass/poison: 2.0 * 1.0
        assert_eq!(
            dual_effectiveness(Type::Fire, (Type::Grass, Some(Type::Poison))),
            2.0
        );
        // Electric vs water/flying: 2.0 * 2.0
        assert_eq!(
            dual_effectiveness(Type::Electric, (Type::Water, Some(Type::Flying))),
            4.0
        );
        // Electric vs grass/ground: 0.5 * 0.0
        assert_eq!(
            dual_effectiveness(Type::Electric, (Type::Grass, Some(Type::Ground))),
            0.0
        );
    }

    #[test]
    fn chart_is_symmetric_in_coverage() {
        // Every pairing must resolve without panicking and stay in the
        // known multiplier set.
        let all = [
            Type::Normal,
            Type::Fighting,
            Type::Flying,
            Type::Poison,
            Type::Ground,
            Type::Rock,
            Type::Bug,
            Type::Ghost,
            Type::Steel,
            Type::Fire,
            Type::Water,
            Type::Grass,
            Type::Electric,
            Type::Psychic,
            Type::Ice,
            Type::Dragon,
            Type::Dark,
        ];
        for atk in all {
            for def in all {
                let m = effectiveness(atk, def);
                assert!(
                    m == 0.0 || m == 0.5 || m == 1.0 || m == 2.0,
                    "unexpected multiplier {} for {:?} vs {:?}",
                    m,
                    atk,
                    def
                );
            }
        }
    }
}
