//! Makeup palette state.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MakeupTool {
    #[default]
    Lips,
    Blush,
    Shadow,
    Liner,
    Freckles,
    Sparkles,
}

impl MakeupTool {
    pub const ALL: [Self; 6] = [
        Self::Lips,
        Self::Blush,
        Self::Shadow,
        Self::Liner,
        Self::Freckles,
        Self::Sparkles,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lips => "lips",
            Self::Blush => "blush",
            Self::Shadow => "shadow",
            Self::Liner => "liner",
            Self::Freckles => "freckles",
            Self::Sparkles => "sparkles",
        }
    }

    /// Swatches offered for this tool.
    #[must_use]
    pub const fn palette(self) -> &'static [&'static str] {
        match self {
            Self::Lips => &["#ff4fd8", "#fb7185", "#f43f5e", "#fbbf24", "#a78bfa", "#60a5fa"],
            Self::Blush => &[
                "rgba(255,79,216,.35)",
                "rgba(251,113,133,.35)",
                "rgba(251,191,36,.28)",
                "rgba(167,139,250,.30)",
            ],
            Self::Shadow => &[
                "rgba(167,139,250,.35)",
                "rgba(96,165,250,.28)",
                "rgba(52,211,153,.22)",
                "rgba(251,191,36,.25)",
            ],
            Self::Liner => &[
                "rgba(0,0,0,.35)",
                "rgba(0,0,0,.22)",
                "rgba(96,165,250,.28)",
                "rgba(167,139,250,.28)",
            ],
            Self::Freckles => &["rgba(170,92,41,.35)", "rgba(120,62,22,.30)", "rgba(0,0,0,.18)"],
            Self::Sparkles => &[
                "rgba(255,255,255,.95)",
                "rgba(251,191,36,.90)",
                "rgba(255,79,216,.85)",
                "rgba(96,165,250,.85)",
            ],
        }
    }
}

impl fmt::Display for MakeupTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected tool plus the color applied by each tool, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlamLook {
    #[serde(default)]
    pub tool: MakeupTool,
    #[serde(default)]
    pub lips: Option<String>,
    #[serde(default)]
    pub blush: Option<String>,
    #[serde(default)]
    pub shadow: Option<String>,
    #[serde(default)]
    pub liner: Option<String>,
    #[serde(default)]
    pub freckles: Option<String>,
    #[serde(default)]
    pub sparkles: Option<String>,
}

impl GlamLook {
    fn slot_mut(&mut self, tool: MakeupTool) -> &mut Option<String> {
        match tool {
            MakeupTool::Lips => &mut self.lips,
            MakeupTool::Blush => &mut self.blush,
            MakeupTool::Shadow => &mut self.shadow,
            MakeupTool::Liner => &mut self.liner,
            MakeupTool::Freckles => &mut self.freckles,
            MakeupTool::Sparkles => &mut self.sparkles,
        }
    }

    #[must_use]
    pub fn color(&self, tool: MakeupTool) -> Option<&str> {
        match tool {
            MakeupTool::Lips => self.lips.as_deref(),
            MakeupTool::Blush => self.blush.as_deref(),
            MakeupTool::Shadow => self.shadow.as_deref(),
            MakeupTool::Liner => self.liner.as_deref(),
            MakeupTool::Freckles => self.freckles.as_deref(),
            MakeupTool::Sparkles => self.sparkles.as_deref(),
        }
    }

    pub fn apply(&mut self, tool: MakeupTool, color: &str) {
        *self.slot_mut(tool) = Some(color.to_string());
    }

    /// Remove every color; the selected tool stays.
    pub fn clear(&mut self) {
        for tool in MakeupTool::ALL {
            *self.slot_mut(tool) = None;
        }
    }

    /// Random lips, blush and shadow from their palettes.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for tool in [MakeupTool::Lips, MakeupTool::Blush, MakeupTool::Shadow] {
            if let Some(color) = tool.palette().choose(rng) {
                self.apply(tool, color);
            }
        }
    }

    /// Lips, blush and shadow are all set.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.lips.is_some() && self.blush.is_some() && self.shadow.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn full_look_needs_lips_blush_and_shadow() {
        let mut look = GlamLook::default();
        look.apply(MakeupTool::Lips, "#ff4fd8");
        look.apply(MakeupTool::Blush, "rgba(255,79,216,.35)");
        look.apply(MakeupTool::Sparkles, "rgba(255,255,255,.95)");
        assert!(!look.is_full());
        look.apply(MakeupTool::Shadow, "rgba(96,165,250,.28)");
        assert!(look.is_full());
    }

    #[test]
    fn clear_keeps_tool() {
        let mut look = GlamLook {
            tool: MakeupTool::Freckles,
            ..GlamLook::default()
        };
        look.apply(MakeupTool::Freckles, "rgba(0,0,0,.18)");
        look.clear();
        assert_eq!(look.tool, MakeupTool::Freckles);
        assert!(MakeupTool::ALL.iter().all(|tool| look.color(*tool).is_none()));
    }

    #[test]
    fn randomize_picks_from_palettes() {
        let mut look = GlamLook::default();
        look.randomize(&mut ChaCha20Rng::seed_from_u64(11));
        assert!(look.is_full());
        for tool in [MakeupTool::Lips, MakeupTool::Blush, MakeupTool::Shadow] {
            let color = look.color(tool).unwrap();
            assert!(tool.palette().contains(&color));
        }
        assert!(look.liner.is_none());
    }
}
