use crate::definition::Tier;

/// Base selection weight per tier.
///
/// The effective weight of a candidate is `tier weight × spawn weight`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TierWeights {
    pub common: f32,
    pub rare: f32,
    pub epic: f32,
    pub legendary: f32,
}

impl TierWeights {
    pub const DEFAULT_COMMON: f32 = 60.0;
    pub const DEFAULT_RARE: f32 = 25.0;
    pub const DEFAULT_EPIC: f32 = 12.0;
    pub const DEFAULT_LEGENDARY: f32 = 3.0;

    pub const fn new(common: f32, rare: f32, epic: f32, legendary: f32) -> Self {
        Self {
            common,
            rare,
            epic,
            legendary,
        }
    }

    /// Base weight for a tier. Negative configured values count as zero.
    pub fn weight(&self, tier: Tier) -> f32 {
        let raw = match tier {
            Tier::Common => self.common,
            Tier::Rare => self.rare,
            Tier::Epic => self.epic,
            Tier::Legendary => self.legendary,
        };
        raw.max(0.0)
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_COMMON,
            Self::DEFAULT_RARE,
            Self::DEFAULT_EPIC,
            Self::DEFAULT_LEGENDARY,
        )
    }
}

/// Tunable parameters for offers and catalog loading.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionConfig {
    pub tier_weights: TierWeights,
    /// Number of candidates drawn per decision point.
    pub offer_count: usize,
    /// Whether the same definition may appear more than once in one offer.
    pub allow_duplicates: bool,
    /// Floor applied to non-positive spawn weights at load time.
    pub min_spawn_weight: f32,
}

impl SelectionConfig {
    pub const DEFAULT_OFFER_COUNT: usize = 3;
    pub const DEFAULT_MIN_SPAWN_WEIGHT: f32 = 0.01;

    pub fn new() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            offer_count: Self::DEFAULT_OFFER_COUNT,
            allow_duplicates: false,
            min_spawn_weight: Self::DEFAULT_MIN_SPAWN_WEIGHT,
        }
    }

    pub fn with_offer_count(mut self, offer_count: usize) -> Self {
        self.offer_count = offer_count;
        self
    }

    pub fn with_tier_weights(mut self, tier_weights: TierWeights) -> Self {
        self.tier_weights = tier_weights;
        self
    }

    pub fn with_duplicates(mut self, allow_duplicates: bool) -> Self {
        self.allow_duplicates = allow_duplicates;
        self
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::new()
    }
}
