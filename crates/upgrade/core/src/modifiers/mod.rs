//! Modifier algebra.
//!
//! A [`ModifierSet`] is the stat delta of one upgrade, and also the composed
//! total of every upgrade accepted so far. Each field belongs to one of four
//! combination classes:
//!
//! ```text
//! Multiplicative  identity 1.0    a × b
//! Additive        identity 0      a + b
//! Max-wins        identity 0      max(a, b)   (critical multiplier: 1.0)
//! Flags           identity empty  a ∪ b
//! ```
//!
//! Every class is commutative and associative, so the composed total does not
//! depend on the order in which upgrades were accepted.

mod flags;
mod set;
mod weapon;

pub use flags::WeaponFlags;
pub use set::ModifierSet;
pub use weapon::WeaponStats;
