//! Effective weapon stats after modifiers.
//!
//! The weapon system keeps its own base numbers; it hands them to
//! [`WeaponStats::apply`] together with the composed modifier set whenever a
//! `ModifiersChanged` notification arrives.

use super::flags::WeaponFlags;
use super::set::ModifierSet;

/// Combat-relevant weapon numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponStats {
    /// Shots per second.
    pub fire_rate: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_count: u32,
    /// Total fan angle in degrees across all projectiles.
    pub spread_angle: f32,
    pub piercing: u32,
    /// Probability in `[0, 1]`.
    pub critical_chance: f32,
    pub critical_multiplier: f32,
    pub homing_strength: f32,
    pub explosion_radius: f32,
    pub ricochet_count: u32,
    pub chain_lightning_targets: u32,
    pub beam_duration: f32,
    pub flags: WeaponFlags,
}

impl WeaponStats {
    /// Applies a composed modifier set to these base stats.
    ///
    /// Multipliers scale, additive fields add, max-wins fields take the larger
    /// of base and modifier, flags union. Spread never goes below zero and
    /// critical chance is clamped to `[0, 1]`.
    pub fn apply(&self, modifiers: &ModifierSet) -> Self {
        Self {
            fire_rate: self.fire_rate * modifiers.fire_rate_multiplier,
            damage: self.damage * modifiers.damage_multiplier,
            projectile_speed: self.projectile_speed * modifiers.projectile_speed_multiplier,
            projectile_size: self.projectile_size * modifiers.projectile_size_multiplier,
            projectile_count: self
                .projectile_count
                .saturating_add(modifiers.additional_projectiles),
            spread_angle: (self.spread_angle + modifiers.spread_angle_add).max(0.0),
            piercing: self.piercing.saturating_add(modifiers.piercing_count),
            critical_chance: (self.critical_chance + modifiers.critical_chance).clamp(0.0, 1.0),
            critical_multiplier: self.critical_multiplier.max(modifiers.critical_multiplier),
            homing_strength: self.homing_strength.max(modifiers.homing_strength),
            explosion_radius: self.explosion_radius.max(modifiers.explosion_radius),
            ricochet_count: self.ricochet_count.max(modifiers.ricochet_count),
            chain_lightning_targets: self
                .chain_lightning_targets
                .max(modifiers.chain_lightning_targets),
            beam_duration: self.beam_duration.max(modifiers.beam_duration),
            flags: self.flags | modifiers.flags,
        }
    }

    /// Seconds between shots, or `None` when the weapon cannot fire.
    pub fn fire_interval(&self) -> Option<f32> {
        (self.fire_rate > 0.0).then(|| 1.0 / self.fire_rate)
    }
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            fire_rate: 5.0,
            damage: 10.0,
            projectile_speed: 20.0,
            projectile_size: 1.0,
            projectile_count: 1,
            spread_angle: 0.0,
            piercing: 0,
            critical_chance: 0.0,
            critical_multiplier: 1.5,
            homing_strength: 0.0,
            explosion_radius: 0.0,
            ricochet_count: 0,
            chain_lightning_targets: 0,
            beam_duration: 0.0,
            flags: WeaponFlags::empty(),
        }
    }
}
