use super::flags::WeaponFlags;

/// Stat delta contributed by one upgrade, or the composed total of many.
///
/// # Combination classes
///
/// | Class          | Fields                                                   |
/// |----------------|----------------------------------------------------------|
/// | Multiplicative | `*_multiplier` except `critical_multiplier`              |
/// | Additive       | projectiles, spread, piercing, crit chance, bonus pickups |
/// | Max-wins       | crit multiplier, homing, explosion, ricochet, chain, beam |
/// | Flags          | `flags`                                                  |
///
/// The max-wins family caps rather than accumulates: two explosion upgrades
/// yield the larger radius, not the sum.
///
/// # Example
/// ```
/// # use upgrade_core::ModifierSet;
/// let a = ModifierSet { damage_multiplier: 1.5, ..ModifierSet::IDENTITY };
/// let b = ModifierSet { damage_multiplier: 1.2, ..ModifierSet::IDENTITY };
/// let total = a.combine(&b);
/// assert!((total.damage_multiplier - 1.8).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModifierSet {
    // Multiplicative
    pub fire_rate_multiplier: f32,
    pub damage_multiplier: f32,
    pub projectile_speed_multiplier: f32,
    pub projectile_size_multiplier: f32,

    // Additive
    pub additional_projectiles: u32,
    pub spread_angle_add: f32,
    pub piercing_count: u32,
    pub critical_chance: f32,
    pub bonus_shields: u32,
    pub bonus_smart_bombs: u32,
    pub bonus_health: u32,

    // Max-wins
    pub critical_multiplier: f32,
    pub homing_strength: f32,
    pub explosion_radius: f32,
    pub ricochet_count: u32,
    pub chain_lightning_targets: u32,
    pub beam_duration: f32,

    pub flags: WeaponFlags,
}

impl ModifierSet {
    /// The neutral element: combining it with any set yields that set.
    pub const IDENTITY: Self = Self {
        fire_rate_multiplier: 1.0,
        damage_multiplier: 1.0,
        projectile_speed_multiplier: 1.0,
        projectile_size_multiplier: 1.0,

        additional_projectiles: 0,
        spread_angle_add: 0.0,
        piercing_count: 0,
        critical_chance: 0.0,
        bonus_shields: 0,
        bonus_smart_bombs: 0,
        bonus_health: 0,

        critical_multiplier: 1.0,
        homing_strength: 0.0,
        explosion_radius: 0.0,
        ricochet_count: 0,
        chain_lightning_targets: 0,
        beam_duration: 0.0,

        flags: WeaponFlags::empty(),
    };

    /// Field-by-field composition of two sets.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            fire_rate_multiplier: self.fire_rate_multiplier * other.fire_rate_multiplier,
            damage_multiplier: self.damage_multiplier * other.damage_multiplier,
            projectile_speed_multiplier: self.projectile_speed_multiplier
                * other.projectile_speed_multiplier,
            projectile_size_multiplier: self.projectile_size_multiplier
                * other.projectile_size_multiplier,

            additional_projectiles: self
                .additional_projectiles
                .saturating_add(other.additional_projectiles),
            spread_angle_add: self.spread_angle_add + other.spread_angle_add,
            piercing_count: self.piercing_count.saturating_add(other.piercing_count),
            critical_chance: self.critical_chance + other.critical_chance,
            bonus_shields: self.bonus_shields.saturating_add(other.bonus_shields),
            bonus_smart_bombs: self.bonus_smart_bombs.saturating_add(other.bonus_smart_bombs),
            bonus_health: self.bonus_health.saturating_add(other.bonus_health),

            critical_multiplier: self.critical_multiplier.max(other.critical_multiplier),
            homing_strength: self.homing_strength.max(other.homing_strength),
            explosion_radius: self.explosion_radius.max(other.explosion_radius),
            ricochet_count: self.ricochet_count.max(other.ricochet_count),
            chain_lightning_targets: self
                .chain_lightning_targets
                .max(other.chain_lightning_targets),
            beam_duration: self.beam_duration.max(other.beam_duration),

            flags: self.flags | other.flags,
        }
    }

    /// Folds [`Self::combine`] over `sets`, starting from [`Self::IDENTITY`].
    pub fn combine_all<'a>(sets: impl IntoIterator<Item = &'a ModifierSet>) -> Self {
        sets.into_iter()
            .fold(Self::IDENTITY, |acc, set| acc.combine(set))
    }

    /// True when this set changes nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Compares two sets allowing float drift on multiplicative and additive
    /// fields. Integer, max-wins and flag fields must match exactly.
    ///
    /// The tolerance is relative for magnitudes above 1.
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0);

        close(self.fire_rate_multiplier, other.fire_rate_multiplier)
            && close(self.damage_multiplier, other.damage_multiplier)
            && close(
                self.projectile_speed_multiplier,
                other.projectile_speed_multiplier,
            )
            && close(
                self.projectile_size_multiplier,
                other.projectile_size_multiplier,
            )
            && self.additional_projectiles == other.additional_projectiles
            && close(self.spread_angle_add, other.spread_angle_add)
            && self.piercing_count == other.piercing_count
            && close(self.critical_chance, other.critical_chance)
            && self.bonus_shields == other.bonus_shields
            && self.bonus_smart_bombs == other.bonus_smart_bombs
            && self.bonus_health == other.bonus_health
            && self.critical_multiplier == other.critical_multiplier
            && self.homing_strength == other.homing_strength
            && self.explosion_radius == other.explosion_radius
            && self.ricochet_count == other.ricochet_count
            && self.chain_lightning_targets == other.chain_lightning_targets
            && self.beam_duration == other.beam_duration
            && self.flags == other.flags
    }
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self::IDENTITY
    }
}
