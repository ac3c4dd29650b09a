use proptest::prelude::*;
use upgrade_core::{ModifierSet, WeaponFlags};

const TOLERANCE: f32 = 1e-4;

prop_compose! {
    fn modifier_set()(
        (fire_rate, damage, speed, size) in (0.25f32..4.0, 0.25f32..4.0, 0.25f32..4.0, 0.25f32..4.0),
        (projectiles, spread, piercing, crit_chance) in (0u32..8, -20.0f32..20.0, 0u32..8, 0.0f32..0.5),
        (shields, bombs, health) in (0u32..5, 0u32..5, 0u32..5),
        (crit_mult, homing, explosion) in (1.0f32..5.0, 0.0f32..1.0, 0.0f32..10.0),
        (ricochet, chain, beam) in (0u32..6, 0u32..6, 0.0f32..3.0),
        bits in any::<u8>(),
    ) -> ModifierSet {
        ModifierSet {
            fire_rate_multiplier: fire_rate,
            damage_multiplier: damage,
            projectile_speed_multiplier: speed,
            projectile_size_multiplier: size,
            additional_projectiles: projectiles,
            spread_angle_add: spread,
            piercing_count: piercing,
            critical_chance: crit_chance,
            bonus_shields: shields,
            bonus_smart_bombs: bombs,
            bonus_health: health,
            critical_multiplier: crit_mult,
            homing_strength: homing,
            explosion_radius: explosion,
            ricochet_count: ricochet,
            chain_lightning_targets: chain,
            beam_duration: beam,
            flags: WeaponFlags::from_bits_truncate(bits),
        }
    }
}

proptest! {
    #[test]
    fn combine_is_commutative(a in modifier_set(), b in modifier_set()) {
        prop_assert!(a.combine(&b).approx_eq(&b.combine(&a), TOLERANCE));
    }

    #[test]
    fn combine_is_associative(a in modifier_set(), b in modifier_set(), c in modifier_set()) {
        let left = a.combine(&b).combine(&c);
        let right = a.combine(&b.combine(&c));
        prop_assert!(left.approx_eq(&right, TOLERANCE), "{left:?} != {right:?}");
    }

    #[test]
    fn identity_is_neutral(x in modifier_set()) {
        prop_assert_eq!(ModifierSet::IDENTITY.combine(&x), x);
        prop_assert_eq!(x.combine(&ModifierSet::IDENTITY), x);
    }

    #[test]
    fn fold_order_does_not_matter(sets in prop::collection::vec(modifier_set(), 0..12)) {
        let forward = ModifierSet::combine_all(&sets);
        let backward = ModifierSet::combine_all(sets.iter().rev());
        prop_assert!(forward.approx_eq(&backward, TOLERANCE));
    }
}

#[test]
fn damage_multipliers_compose_multiplicatively() {
    let a = ModifierSet {
        damage_multiplier: 1.5,
        ..ModifierSet::IDENTITY
    };
    let b = ModifierSet {
        damage_multiplier: 1.2,
        ..ModifierSet::IDENTITY
    };

    let total = a.combine(&b);

    assert!((total.damage_multiplier - 1.8).abs() <= TOLERANCE);
    assert!(
        ModifierSet {
            damage_multiplier: 1.0,
            ..total
        }
        .is_identity()
    );
}
