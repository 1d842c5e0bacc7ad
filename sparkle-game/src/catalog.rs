//! Static mission and badge catalogs.
//!
//! Both tables are indexed by their enum discriminant, so the declaration
//! order of `MissionId`/`BadgeId` must match the order of the tables.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One-time tasks tracked on the mission board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissionId {
    Hair,
    Outfit,
    Acc,
    SaveLook,
    GlamTool,
    GlamColor,
    GlamFull,
    BrickPlace,
    Tower8,
    BrickGoal,
    StickerPlace,
    Stickers10,
    StickerSave,
}

/// Unlockable badges shown in the trophy room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeId {
    Starter,
    Hero,
    All,
    Princess,
    Builder,
    Party,
    Glam,
    Tower,
    GoalTower,
    Heart,
    Rainbow,
    Decorator,
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionSpec {
    pub id: MissionId,
    pub text: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeSpec {
    pub id: BadgeId,
    pub title: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
}

pub static MISSIONS: [MissionSpec; 13] = [
    MissionSpec {
        id: MissionId::Hair,
        text: "Pick a hair style",
        points: 2,
    },
    MissionSpec {
        id: MissionId::Outfit,
        text: "Pick an outfit",
        points: 2,
    },
    MissionSpec {
        id: MissionId::Acc,
        text: "Turn on an accessory",
        points: 2,
    },
    MissionSpec {
        id: MissionId::SaveLook,
        text: "Save your favorite look",
        points: 3,
    },
    MissionSpec {
        id: MissionId::GlamTool,
        text: "Choose a makeup tool",
        points: 2,
    },
    MissionSpec {
        id: MissionId::GlamColor,
        text: "Pick a makeup color",
        points: 2,
    },
    MissionSpec {
        id: MissionId::GlamFull,
        text: "Make a full glam look",
        points: 4,
    },
    MissionSpec {
        id: MissionId::BrickPlace,
        text: "Place a brick",
        points: 2,
    },
    MissionSpec {
        id: MissionId::Tower8,
        text: "Build a tower 8 blocks tall",
        points: 4,
    },
    MissionSpec {
        id: MissionId::BrickGoal,
        text: "Complete a brick goal",
        points: 5,
    },
    MissionSpec {
        id: MissionId::StickerPlace,
        text: "Place a sticker",
        points: 2,
    },
    MissionSpec {
        id: MissionId::Stickers10,
        text: "Place 10 stickers",
        points: 4,
    },
    MissionSpec {
        id: MissionId::StickerSave,
        text: "Save your sticker room",
        points: 4,
    },
];

pub static BADGES: [BadgeSpec; 13] = [
    BadgeSpec {
        id: BadgeId::Starter,
        title: "Sparkle Starter",
        desc: "Complete 4 missions!",
        icon: "✨",
    },
    BadgeSpec {
        id: BadgeId::Hero,
        title: "Studio Hero",
        desc: "Complete 8 missions!",
        icon: "🌟",
    },
    BadgeSpec {
        id: BadgeId::All,
        title: "Studio Superstar",
        desc: "Complete ALL missions!",
        icon: "🏆",
    },
    BadgeSpec {
        id: BadgeId::Princess,
        title: "Princess Sparkle",
        desc: "Princess outfit + crown + wand!",
        icon: "👑",
    },
    BadgeSpec {
        id: BadgeId::Builder,
        title: "Builder Buddy",
        desc: "Builder outfit + sneakers!",
        icon: "🧱",
    },
    BadgeSpec {
        id: BadgeId::Party,
        title: "Party Pop",
        desc: "Party look with accessories!",
        icon: "🎉",
    },
    BadgeSpec {
        id: BadgeId::Glam,
        title: "Glam Star",
        desc: "Lip + blush + shadow complete!",
        icon: "💄",
    },
    BadgeSpec {
        id: BadgeId::Tower,
        title: "Tower Builder",
        desc: "Built a tall tower!",
        icon: "🏗️",
    },
    BadgeSpec {
        id: BadgeId::GoalTower,
        title: "Goal Getter",
        desc: "Completed a brick goal!",
        icon: "🎯",
    },
    BadgeSpec {
        id: BadgeId::Heart,
        title: "Heart Builder",
        desc: "Built a heart pattern!",
        icon: "💖",
    },
    BadgeSpec {
        id: BadgeId::Rainbow,
        title: "Rainbow Maker",
        desc: "Built a rainbow pattern!",
        icon: "🌈",
    },
    BadgeSpec {
        id: BadgeId::Decorator,
        title: "Room Decorator",
        desc: "Placed lots of stickers!",
        icon: "🧸",
    },
    BadgeSpec {
        id: BadgeId::Welcome,
        title: "Welcome Sparkle",
        desc: "First visit to Sparkle Studio!",
        icon: "✨",
    },
];

impl MissionId {
    #[must_use]
    pub fn spec(self) -> &'static MissionSpec {
        &MISSIONS[self as usize]
    }

    #[must_use]
    pub fn points(self) -> u32 {
        self.spec().points
    }

    pub fn all() -> impl Iterator<Item = Self> {
        MISSIONS.iter().map(|m| m.id)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hair => "hair",
            Self::Outfit => "outfit",
            Self::Acc => "acc",
            Self::SaveLook => "saveLook",
            Self::GlamTool => "glamTool",
            Self::GlamColor => "glamColor",
            Self::GlamFull => "glamFull",
            Self::BrickPlace => "brickPlace",
            Self::Tower8 => "tower8",
            Self::BrickGoal => "brickGoal",
            Self::StickerPlace => "stickerPlace",
            Self::Stickers10 => "stickers10",
            Self::StickerSave => "stickerSave",
        }
    }
}

impl BadgeId {
    #[must_use]
    pub fn spec(self) -> &'static BadgeSpec {
        &BADGES[self as usize]
    }

    pub fn all() -> impl Iterator<Item = Self> {
        BADGES.iter().map(|b| b.id)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Hero => "hero",
            Self::All => "all",
            Self::Princess => "princess",
            Self::Builder => "builder",
            Self::Party => "party",
            Self::Glam => "glam",
            Self::Tower => "tower",
            Self::GoalTower => "goalTower",
            Self::Heart => "heart",
            Self::Rainbow => "rainbow",
            Self::Decorator => "decorator",
            Self::Welcome => "welcome",
        }
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all().find(|id| id.as_str() == s).ok_or(())
    }
}

impl FromStr for BadgeId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all().find(|id| id.as_str() == s).ok_or(())
    }
}
