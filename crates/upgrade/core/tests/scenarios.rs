use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use upgrade_core::{
    Category, EligibilityFilter, FnObserver, ModifierAccumulator, ModifierSet, PcgStream,
    RunSession, SelectionConfig, SelectionCoordinator, Tier, TierWeights, UpgradeCatalog,
    UpgradeDefinition, UpgradeEvent, WeaponFlags, WeightedSelector,
};

const SEED: u64 = 0x5EED_CAFE;

fn scenario_a_catalog() -> Arc<UpgradeCatalog> {
    let defs = vec![
        UpgradeDefinition::builder("common_1", Category::Damage).build(),
        UpgradeDefinition::builder("common_2", Category::FireRate).build(),
        UpgradeDefinition::builder("common_3", Category::Utility).build(),
        UpgradeDefinition::builder("legendary_1", Category::Special)
            .tier(Tier::Legendary)
            .build(),
    ];
    Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap())
}

fn draw_ids(catalog: &UpgradeCatalog, seed: u64) -> Vec<String> {
    let weights = TierWeights::new(60.0, 25.0, 12.0, 3.0);
    let mut rng = PcgStream::new(seed);
    WeightedSelector::new(&weights)
        .select(catalog.all(), 3, false, &mut rng)
        .iter()
        .map(|def| def.id.clone())
        .collect()
}

#[test]
fn scenario_a_selection_is_distinct_and_reproducible() {
    let catalog = scenario_a_catalog();

    let first = draw_ids(&catalog, SEED);
    let second = draw_ids(&catalog, SEED);

    assert_eq!(first.len(), 3);
    assert_eq!(first.iter().collect::<HashSet<_>>().len(), 3);
    assert_eq!(first, second);
}

#[test]
fn selection_bounds_hold_for_every_count() {
    let catalog = scenario_a_catalog();
    let weights = TierWeights::default();
    let selector = WeightedSelector::new(&weights);

    for seed in 0..50u64 {
        for count in 0..7usize {
            let mut rng = PcgStream::new(seed);
            let picked = selector.select(catalog.all(), count, false, &mut rng);
            assert_eq!(picked.len(), count.min(catalog.len()));
            let distinct: HashSet<&str> = picked.iter().map(|d| d.id.as_str()).collect();
            assert_eq!(distinct.len(), picked.len());
        }
    }
}

#[test]
fn scenario_b_single_stack_upgrade_becomes_ineligible() {
    let multishot = UpgradeDefinition::builder("multishot", Category::ProjectileType)
        .effect(ModifierSet {
            additional_projectiles: 2,
            spread_angle_add: 15.0,
            ..ModifierSet::IDENTITY
        })
        .max_stacks(1)
        .build();
    let catalog = Arc::new(UpgradeCatalog::from_definitions(vec![multishot], 0.01).unwrap());
    let mut acc = ModifierAccumulator::new(catalog.clone());
    let def = catalog.get("multishot").unwrap().clone();

    acc.accept(&def).unwrap();

    assert!(!EligibilityFilter::is_eligible(
        &def,
        10,
        acc.stack_counts(),
        acc.active_ids()
    ));
    assert_eq!(acc.stacks("multishot"), 1);
}

#[test]
fn scenario_c_prerequisite_unlocks_after_accept() {
    let defs = vec![
        UpgradeDefinition::builder("A", Category::Damage).build(),
        UpgradeDefinition::builder("B", Category::Damage)
            .requires("A")
            .build(),
    ];
    let catalog = Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap());
    let mut acc = ModifierAccumulator::new(catalog.clone());
    let b = catalog.get("B").unwrap();

    assert!(!EligibilityFilter::is_eligible(
        b,
        1,
        acc.stack_counts(),
        acc.active_ids()
    ));

    acc.accept_id("A").unwrap();

    assert!(EligibilityFilter::is_eligible(
        b,
        1,
        acc.stack_counts(),
        acc.active_ids()
    ));
}

#[test]
fn scenario_e_clear_all_resets() {
    let defs = vec![
        UpgradeDefinition::builder("explosive", Category::Special)
            .effect(ModifierSet {
                explosion_radius: 3.0,
                flags: WeaponFlags::EXPLOSION,
                ..ModifierSet::IDENTITY
            })
            .build(),
    ];
    let catalog = Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap());
    let mut acc = ModifierAccumulator::new(catalog);
    acc.accept_id("explosive").unwrap();
    assert!(acc.composed().flags.explosion());

    acc.clear_all();

    assert_eq!(acc.composed(), ModifierSet::IDENTITY);
    assert!(acc.active().is_empty());
}

#[test]
fn accept_then_remove_round_trips() {
    let defs = vec![
        UpgradeDefinition::builder("rapid_fire", Category::FireRate)
            .effect(ModifierSet {
                fire_rate_multiplier: 1.15,
                ..ModifierSet::IDENTITY
            })
            .max_stacks(5)
            .build(),
        UpgradeDefinition::builder("crit", Category::Damage)
            .effect(ModifierSet {
                critical_chance: 0.1,
                critical_multiplier: 2.0,
                ..ModifierSet::IDENTITY
            })
            .build(),
    ];
    let catalog = Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap());
    let mut acc = ModifierAccumulator::new(catalog);
    acc.accept_id("rapid_fire").unwrap();
    acc.accept_id("rapid_fire").unwrap();
    let before = acc.composed();

    acc.accept_id("crit").unwrap();
    acc.remove("crit").unwrap();

    assert!(acc.composed().approx_eq(&before, 1e-4));
}

#[test]
fn full_run_delivers_every_notification_in_order() {
    let defs = vec![
        UpgradeDefinition::builder("damage_up", Category::Damage)
            .effect(ModifierSet {
                damage_multiplier: 1.2,
                ..ModifierSet::IDENTITY
            })
            .max_stacks(3)
            .build(),
        UpgradeDefinition::builder("homing", Category::Special)
            .tier(Tier::Epic)
            .min_level(3)
            .effect(ModifierSet {
                homing_strength: 0.6,
                flags: WeaponFlags::HOMING,
                ..ModifierSet::IDENTITY
            })
            .build(),
    ];
    let catalog = Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap());
    let mut run = RunSession::new(
        catalog,
        SelectionConfig::new().with_offer_count(2),
        SEED,
    );
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    run.subscribe(Arc::new(FnObserver::new("recorder", move |e: &UpgradeEvent| {
        sink.lock().unwrap().push(e.kind());
    })));

    let offer = run.offer(1);
    assert_eq!(offer.len(), 1, "homing is level gated");
    run.choose("damage_up").unwrap();

    let offer = run.offer(5);
    assert_eq!(offer.len(), 2);
    run.choose("homing").unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        [
            "selection_offered",
            "upgrade_accepted",
            "modifiers_changed",
            "selection_offered",
            "upgrade_accepted",
            "modifiers_changed",
        ]
    );
    let composed = run.composed();
    assert!((composed.damage_multiplier - 1.2).abs() < 1e-4);
    assert!(composed.flags.homing());
    assert_eq!(run.snapshot().accepted, ["damage_up", "homing"]);
}

#[test]
fn coordinator_offer_is_reproducible_for_a_seed() {
    let catalog = scenario_a_catalog();
    let acc = ModifierAccumulator::new(catalog.clone());

    let run = |seed| {
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let mut rng = PcgStream::new(seed);
        (0..5)
            .map(|_| {
                coordinator
                    .offer(&catalog, 1, &acc, 2, false, &mut rng)
                    .iter()
                    .map(|d| d.id.clone())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn coordinator_offer_with_duplicates_repeats_candidates() {
    let defs = vec![
        UpgradeDefinition::builder("rapid_fire", Category::FireRate)
            .max_stacks(5)
            .build(),
    ];
    let catalog = Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap());
    let mut acc = ModifierAccumulator::new(catalog.clone());
    let mut coordinator = SelectionCoordinator::new(TierWeights::default());
    let mut rng = PcgStream::new(SEED);

    let offer = coordinator.offer(&catalog, 1, &acc, 4, true, &mut rng);

    let ids: Vec<&str> = offer.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["rapid_fire"; 4]);
    coordinator.resolve("rapid_fire", &mut acc).unwrap();
    assert_eq!(acc.stacks("rapid_fire"), 1);
}

#[test]
fn huge_offer_count_with_duplicates_and_nothing_eligible_is_empty() {
    let defs = vec![
        UpgradeDefinition::builder("late", Category::Special)
            .min_level(50)
            .build(),
    ];
    let catalog = Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap());
    let config = SelectionConfig::new()
        .with_offer_count(usize::MAX)
        .with_duplicates(true);
    let mut run = RunSession::new(catalog, config, SEED);

    assert!(run.offer(1).is_empty());
}
