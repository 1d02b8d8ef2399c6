/// Collectible item identifiers.
///
/// String forms are snake_case so cheat commands and content files can name
/// items directly (`item five_rupees`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemId {
    Rupee,
    FiveRupees,
    Heart,
    Fairy,
    Clock,
    Bomb,
    Key,
    MagicKey,
    Sword,
    WhiteSword,
    MagicSword,
    HeartContainer,
    Candle,
    Recorder,
    Boomerang,
    TriforcePiece,
    TriforceOfPower,
}

impl ItemId {
    /// Items whose pickup holds the player up in a fanfare pose.
    pub const fn is_power_item(self) -> bool {
        matches!(
            self,
            Self::Sword
                | Self::WhiteSword
                | Self::MagicSword
                | Self::HeartContainer
                | Self::MagicKey
                | Self::Candle
                | Self::Recorder
                | Self::Boomerang
        )
    }

    /// Items that despawn if left on the floor.
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            Self::Rupee | Self::FiveRupees | Self::Heart | Self::Fairy | Self::Clock | Self::Bomb
        )
    }
}

/// Items the B button can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSlot {
    Boomerang,
    Bombs,
    Candle,
    Recorder,
}
