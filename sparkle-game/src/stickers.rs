//! Sticker room state.
use serde::{Deserialize, Serialize};

pub const STICKERS: [&str; 16] = [
    "💖", "🌸", "🦄", "🎀", "👑", "✨", "🌈", "🧸", "🐱", "🐶", "🍓", "🧁", "⭐", "💎", "🪄", "🩷",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomBackground {
    #[default]
    Look1,
    Look2,
    Look3,
    Look4,
}

impl RoomBackground {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Look1 => "look1",
            Self::Look2 => "look2",
            Self::Look3 => "look3",
            Self::Look4 => "look4",
        }
    }
}

/// A sticker dropped in the room, positioned by its center in room pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSticker {
    pub emoji: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StickerRoom {
    #[serde(default)]
    pub placed: Vec<PlacedSticker>,
    #[serde(default)]
    pub bg: RoomBackground,
}

impl StickerRoom {
    /// Append a sticker and return how many are now in the room.
    pub fn place(&mut self, emoji: &str, x: f64, y: f64) -> usize {
        self.placed.push(PlacedSticker {
            emoji: emoji.to_string(),
            x,
            y,
        });
        self.placed.len()
    }

    /// Reposition the sticker at `index`. Returns `false` for a stale index.
    pub fn move_to(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.placed.get_mut(index) {
            Some(sticker) => {
                sticker.x = x;
                sticker.y = y;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.placed.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_move_clear() {
        let mut room = StickerRoom::default();
        assert_eq!(room.place("🦄", 120.0, 90.0), 1);
        assert_eq!(room.place("🌈", 200.0, 140.0), 2);
        assert!(room.move_to(0, 10.0, 20.0));
        assert!(!room.move_to(5, 0.0, 0.0));
        assert_eq!(room.placed[0].x, 10.0);
        assert_eq!(room.placed[1].emoji, "🌈");
        room.clear();
        assert!(room.is_empty());
    }

    #[test]
    fn background_keys_match_asset_names() {
        let json = serde_json::to_string(&RoomBackground::Look3).unwrap();
        assert_eq!(json, format!("\"{}\"", RoomBackground::Look3.as_str()));
    }
}
