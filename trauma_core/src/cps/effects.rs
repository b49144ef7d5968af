//! Cosmetic distortion descriptors per stage, for narrative hand-off

use super::CpsStage;

/// Fixed cosmetic effects for a stage
pub fn cosmetic_effects(stage: CpsStage) -> &'static [&'static str] {
    match stage {
        CpsStage::None => &[],
        CpsStage::WeightOfKnowing => &[
            "whispers at the edge of hearing",
            "shadows linger a moment too long",
        ],
        CpsStage::GlimmerMadness => &[
            "colors bleed past their outlines",
            "text on pages rearranges itself",
            "faces flicker into strangers",
        ],
        CpsStage::RuinMadness => &[
            "walls breathe",
            "allies' voices arrive out of sync with their lips",
            "the floor tilts toward the nearest exit",
        ],
        CpsStage::HollowShell => &[
            "the world drains to grey",
            "sound arrives as if from underwater",
            "reflections no longer follow",
        ],
    }
}
