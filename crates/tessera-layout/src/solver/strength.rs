//! Composite Cassowary strengths.
//!
//! A strength packs three tiers into one `f64`: each tier saturates at
//! 1000 so no number of weaker constraints can outweigh a stronger one.

/// Build a strength from its strong/medium/weak tiers and a multiplier.
pub fn create(strong: f64, medium: f64, weak: f64, weight: f64) -> f64 {
    (strong * weight).clamp(0.0, 1000.0) * 1_000_000.0
        + (medium * weight).clamp(0.0, 1000.0) * 1_000.0
        + (weak * weight).clamp(0.0, 1000.0)
}

/// Constraints at this strength must hold.
pub const REQUIRED: f64 = 1_001_001_000.0;
/// The strongest non-required tier.
pub const STRONG: f64 = 1_000_000.0;
/// Middle tier.
pub const MEDIUM: f64 = 1_000.0;
/// Weakest tier.
pub const WEAK: f64 = 1.0;

/// Clamp a strength into `[0, REQUIRED]`.
pub fn clip(strength: f64) -> f64 {
    strength.clamp(0.0, REQUIRED)
}
