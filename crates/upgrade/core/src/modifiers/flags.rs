use bitflags::bitflags;

bitflags! {
    /// Special weapon behaviours switched on by upgrades.
    ///
    /// Combining two sets is a union: once any accepted upgrade enables a
    /// behaviour it stays enabled.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct WeaponFlags: u8 {
        const HOMING = 1 << 0;
        const REAR_FIRE = 1 << 1;
        const EXPLOSION = 1 << 2;
        const RICOCHET = 1 << 3;
        const CHAIN_LIGHTNING = 1 << 4;
        const BEAM_WEAPON = 1 << 5;
    }
}

impl WeaponFlags {
    pub fn homing(self) -> bool {
        self.contains(Self::HOMING)
    }

    pub fn rear_fire(self) -> bool {
        self.contains(Self::REAR_FIRE)
    }

    pub fn explosion(self) -> bool {
        self.contains(Self::EXPLOSION)
    }

    pub fn ricochet(self) -> bool {
        self.contains(Self::RICOCHET)
    }

    pub fn chain_lightning(self) -> bool {
        self.contains(Self::CHAIN_LIGHTNING)
    }

    pub fn beam_weapon(self) -> bool {
        self.contains(Self::BEAM_WEAPON)
    }
}
