//! The multiplier engine: derives the progress, power and energy multipliers
//! from the modifier set.
//!
//! Every function here is pure. The [`Session`](crate::session::Session)
//! caches the three results and recomputes them explicitly whenever a
//! modifier changes.

use synergy_types::{Modifiers, Multipliers};

use crate::config::MultiplierConfig;
use crate::error::{SynergyError, non_negative_real};
use crate::events::MultiplierKind;

/// Stage at which the potion bonus starts scaling.
const POTION_BASE_STAGE: i32 = 400;

/// Stages per potion bonus step.
const POTION_STAGE_STEP: i32 = 100;

/// Progress bonus of the newb progress trophy.
const NEWB_PROGRESS_TROPHY: f64 = 0.05;

/// Progress bonus of the pro progress trophy.
const PRO_PROGRESS_TROPHY: f64 = 0.1;

/// Power bonus of the soul shop purchase.
const SOUL_POWER_PURCHASE: f64 = 0.250_01;

/// Compounding power bonus per pomos level.
const POMOS_POWER_PER_LEVEL: f64 = 1.005;

/// Energy bonus of the newb energy trophy.
const NEWB_ENERGY_TROPHY: f64 = 0.3;

/// Energy bonus of the pro energy trophy.
const PRO_ENERGY_TROPHY: f64 = 0.7;

/// Synergy potion strength for a given max stage.
///
/// `0.5 * 1.2^floor((max_stage - 400) / 100) + 1`.
pub fn potion_bonus(max_stage: i32) -> f64 {
    let steps = max_stage
        .saturating_sub(POTION_BASE_STAGE)
        .div_euclid(POTION_STAGE_STEP);
    0.5_f64.mul_add(1.2_f64.powi(steps), 1.0)
}

/// Factor contributed by an active potion, or 1 without one.
fn potion_factor(modifiers: &Modifiers) -> f64 {
    if modifiers.syn_pot_active {
        potion_bonus(modifiers.max_stage)
    } else {
        1.0
    }
}

/// `bonus` when `owned`, else 0.
const fn bonus_if(owned: bool, bonus: f64) -> f64 {
    if owned { bonus } else { 0.0 }
}

/// `1 + bonus` when `owned`, else 1.
const fn owned(owned: bool, bonus: f64) -> f64 {
    1.0 + bonus_if(owned, bonus)
}

/// Multiplier on points added per unit per tick.
pub fn progress_multiplier(modifiers: &Modifiers) -> f64 {
    let trophies = 1.0
        + bonus_if(modifiers.newb_progress_trophy, NEWB_PROGRESS_TROPHY)
        + bonus_if(modifiers.pro_progress_trophy, PRO_PROGRESS_TROPHY);
    trophies * potion_factor(modifiers)
}

/// Multiplier on bonus points earned per fill.
pub fn power_multiplier(modifiers: &Modifiers, config: &MultiplierConfig) -> f64 {
    let trophies = 1.0
        + bonus_if(modifiers.newb_power_trophy, config.newb_power_trophy_bonus)
        + bonus_if(modifiers.pro_power_trophy, config.pro_power_trophy_bonus);
    let perk = f64::from(modifiers.perk_level);
    potion_factor(modifiers)
        * trophies
        * owned(modifiers.soul_power_purchase, SOUL_POWER_PURCHASE)
        * (1.0 + modifiers.adventure_power_pct / 100.0)
        * perk.mul_add(perk + 1.0, 200.0) / 200.0
        * POMOS_POWER_PER_LEVEL.powf(f64::from(modifiers.pomos_levels))
}

/// Multiplier on synergy energy earned per fill.
pub fn energy_multiplier(modifiers: &Modifiers) -> f64 {
    (1.0 + modifiers.adventure_energy_pct / 100.0)
        * owned(modifiers.newb_energy_trophy, NEWB_ENERGY_TROPHY)
        * owned(modifiers.pro_energy_trophy, PRO_ENERGY_TROPHY)
}

/// All three multipliers at once.
pub fn compute(modifiers: &Modifiers, config: &MultiplierConfig) -> Multipliers {
    Multipliers {
        progress: progress_multiplier(modifiers),
        power: power_multiplier(modifiers, config),
        energy: energy_multiplier(modifiers),
    }
}

// ---------------------------------------------------------------------------
// Modifier changes
// ---------------------------------------------------------------------------

/// A single validated modifier update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModifierChange {
    /// Toggle the synergy potion.
    SynPotActive(bool),
    /// Toggle the newb progress trophy.
    NewbProgressTrophy(bool),
    /// Toggle the pro progress trophy.
    ProProgressTrophy(bool),
    /// Toggle the newb power trophy.
    NewbPowerTrophy(bool),
    /// Toggle the pro power trophy.
    ProPowerTrophy(bool),
    /// Toggle the soul power purchase.
    SoulPowerPurchase(bool),
    /// Set adventure power, in percent.
    AdventurePowerPct(f64),
    /// Set the power perk level.
    PerkLevel(u32),
    /// Set the pomos power levels.
    PomosLevels(u32),
    /// Set the max stage.
    MaxStage(i32),
    /// Toggle the newb energy trophy.
    NewbEnergyTrophy(bool),
    /// Toggle the pro energy trophy.
    ProEnergyTrophy(bool),
    /// Set adventure energy, in percent.
    AdventureEnergyPct(f64),
}

/// Modifier names accepted by [`ModifierChange::parse`].
pub const MODIFIER_NAMES: [&str; 13] = [
    "syn_pot_active",
    "newb_progress_trophy",
    "pro_progress_trophy",
    "newb_power_trophy",
    "pro_power_trophy",
    "soul_power_purchase",
    "adventure_power_pct",
    "perk_level",
    "pomos_levels",
    "max_stage",
    "newb_energy_trophy",
    "pro_energy_trophy",
    "adventure_energy_pct",
];

impl ModifierChange {
    /// Parse a `name = value` pair as typed on the command line.
    ///
    /// Names are the snake case modifier names; dashes are accepted in
    /// place of underscores.
    pub fn parse(name: &str, value: &str) -> Result<Self, SynergyError> {
        let name = name.trim().to_ascii_lowercase().replace('-', "_");
        let value = value.trim();
        let change = match name.as_str() {
            "syn_pot_active" => Self::SynPotActive(parse_flag(value)?),
            "newb_progress_trophy" => Self::NewbProgressTrophy(parse_flag(value)?),
            "pro_progress_trophy" => Self::ProProgressTrophy(parse_flag(value)?),
            "newb_power_trophy" => Self::NewbPowerTrophy(parse_flag(value)?),
            "pro_power_trophy" => Self::ProPowerTrophy(parse_flag(value)?),
            "soul_power_purchase" => Self::SoulPowerPurchase(parse_flag(value)?),
            "adventure_power_pct" => Self::AdventurePowerPct(parse_real(value)?),
            "perk_level" => Self::PerkLevel(parse_level(value)?),
            "pomos_levels" => Self::PomosLevels(parse_level(value)?),
            "max_stage" => Self::MaxStage(
                value
                    .parse()
                    .map_err(|e| SynergyError::invalid("max_stage", format!("{value}: {e}")))?,
            ),
            "newb_energy_trophy" => Self::NewbEnergyTrophy(parse_flag(value)?),
            "pro_energy_trophy" => Self::ProEnergyTrophy(parse_flag(value)?),
            "adventure_energy_pct" => Self::AdventureEnergyPct(parse_real(value)?),
            _ => {
                return Err(SynergyError::invalid(
                    "modifier",
                    format!("unknown modifier '{name}' (expected one of {})", MODIFIER_NAMES.join(", ")),
                ));
            }
        };
        change.validated()
    }

    /// Reject negative or non-finite percentages.
    pub fn validated(self) -> Result<Self, SynergyError> {
        match self {
            Self::AdventurePowerPct(pct) => {
                non_negative_real("adventure_power_pct", pct).map(Self::AdventurePowerPct)
            }
            Self::AdventureEnergyPct(pct) => {
                non_negative_real("adventure_energy_pct", pct).map(Self::AdventureEnergyPct)
            }
            other => Ok(other),
        }
    }

    /// Write this change into `modifiers`.
    pub const fn apply(self, modifiers: &mut Modifiers) {
        match self {
            Self::SynPotActive(v) => modifiers.syn_pot_active = v,
            Self::NewbProgressTrophy(v) => modifiers.newb_progress_trophy = v,
            Self::ProProgressTrophy(v) => modifiers.pro_progress_trophy = v,
            Self::NewbPowerTrophy(v) => modifiers.newb_power_trophy = v,
            Self::ProPowerTrophy(v) => modifiers.pro_power_trophy = v,
            Self::SoulPowerPurchase(v) => modifiers.soul_power_purchase = v,
            Self::AdventurePowerPct(v) => modifiers.adventure_power_pct = v,
            Self::PerkLevel(v) => modifiers.perk_level = v,
            Self::PomosLevels(v) => modifiers.pomos_levels = v,
            Self::MaxStage(v) => modifiers.max_stage = v,
            Self::NewbEnergyTrophy(v) => modifiers.newb_energy_trophy = v,
            Self::ProEnergyTrophy(v) => modifiers.pro_energy_trophy = v,
            Self::AdventureEnergyPct(v) => modifiers.adventure_energy_pct = v,
        }
    }

    /// The multipliers this modifier feeds into.
    pub const fn affects(self) -> &'static [MultiplierKind] {
        match self {
            Self::SynPotActive(_) | Self::MaxStage(_) => {
                &[MultiplierKind::Progress, MultiplierKind::Power]
            }
            Self::NewbProgressTrophy(_) | Self::ProProgressTrophy(_) => &[MultiplierKind::Progress],
            Self::NewbPowerTrophy(_)
            | Self::ProPowerTrophy(_)
            | Self::SoulPowerPurchase(_)
            | Self::AdventurePowerPct(_)
            | Self::PerkLevel(_)
            | Self::PomosLevels(_) => &[MultiplierKind::Power],
            Self::NewbEnergyTrophy(_) | Self::ProEnergyTrophy(_) | Self::AdventureEnergyPct(_) => {
                &[MultiplierKind::Energy]
            }
        }
    }
}

fn parse_flag(value: &str) -> Result<bool, SynergyError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(SynergyError::invalid("flag", format!("'{other}' is not a boolean"))),
    }
}

fn parse_real(value: &str) -> Result<f64, SynergyError> {
    value
        .parse()
        .map_err(|e| SynergyError::invalid("percentage", format!("{value}: {e}")))
}

fn parse_level(value: &str) -> Result<u32, SynergyError> {
    value
        .parse()
        .map_err(|e| SynergyError::invalid("level", format!("{value}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn potion_bonus_steps_every_hundred_stages() {
        assert!(close(potion_bonus(400), 1.5));
        assert!(close(potion_bonus(499), 1.5));
        assert!(close(potion_bonus(500), 1.6));
        assert!(close(potion_bonus(600), 1.72));
        // Floor division below the base stage.
        assert!(close(potion_bonus(399), 0.5 / 1.2 + 1.0));
    }

    #[test]
    fn neutral_modifiers_give_unit_multipliers() {
        let multipliers = compute(&Modifiers::default(), &MultiplierConfig::default());
        assert!(close(multipliers.progress, 1.0));
        assert!(close(multipliers.power, 1.0));
        assert!(close(multipliers.energy, 1.0));
    }

    #[test]
    fn potion_scales_progress_and_power() {
        let modifiers = Modifiers {
            syn_pot_active: true,
            pro_progress_trophy: true,
            max_stage: 500,
            ..Modifiers::default()
        };
        let multipliers = compute(&modifiers, &MultiplierConfig::default());
        assert!(close(multipliers.progress, 1.1 * 1.6));
        assert!(close(multipliers.power, 1.6));
        assert!(close(multipliers.energy, 1.0));
    }

    #[test]
    fn power_multiplier_combines_every_source() {
        let modifiers = Modifiers {
            newb_power_trophy: true,
            pro_power_trophy: true,
            soul_power_purchase: true,
            adventure_power_pct: 50.0,
            perk_level: 4,
            pomos_levels: 2,
            ..Modifiers::default()
        };
        let expected = 1.3 * 1.250_01 * 1.5 * 1.1 * 1.005 * 1.005;
        assert!(close(power_multiplier(&modifiers, &MultiplierConfig::default()), expected));

        let older = MultiplierConfig {
            newb_power_trophy_bonus: 0.05,
            pro_power_trophy_bonus: 0.1,
        };
        let expected_older = 1.15 * 1.250_01 * 1.5 * 1.1 * 1.005 * 1.005;
        assert!(close(power_multiplier(&modifiers, &older), expected_older));
    }

    #[test]
    fn energy_multiplier_compounds_trophies() {
        let modifiers = Modifiers {
            newb_energy_trophy: true,
            pro_energy_trophy: true,
            adventure_energy_pct: 20.0,
            ..Modifiers::default()
        };
        assert!(close(energy_multiplier(&modifiers), 1.2 * 1.3 * 1.7));
    }

    #[test]
    fn parse_accepts_dashes_and_rejects_unknown_names() {
        assert_eq!(
            ModifierChange::parse("syn-pot-active", "yes").unwrap(),
            ModifierChange::SynPotActive(true)
        );
        assert_eq!(
            ModifierChange::parse("max_stage", "-20").unwrap(),
            ModifierChange::MaxStage(-20)
        );
        assert!(ModifierChange::parse("warp_drive", "1").is_err());
        assert!(ModifierChange::parse("perk_level", "-1").is_err());
        assert!(ModifierChange::parse("adventure_power_pct", "-5").is_err());
        assert!(ModifierChange::parse("pro_power_trophy", "maybe").is_err());
    }

    #[test]
    fn apply_writes_the_field() {
        let mut modifiers = Modifiers::default();
        ModifierChange::PerkLevel(7).apply(&mut modifiers);
        ModifierChange::AdventureEnergyPct(12.5).apply(&mut modifiers);
        assert_eq!(modifiers.perk_level, 7);
        assert!(close(modifiers.adventure_energy_pct, 12.5));
        assert_eq!(
            ModifierChange::MaxStage(500).affects(),
            &[MultiplierKind::Progress, MultiplierKind::Power]
        );
    }
}
