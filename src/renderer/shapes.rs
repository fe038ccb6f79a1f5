//! Shape generation for sprite artwork
//!
//! Sprites are drawn as flat polygons instead of loaded images. Outlines
//! are stored in a unit square (0,0 top-left to 1,1 bottom-right) and
//! stretched to each sprite's rectangle.

use glam::Vec2;

use crate::sim::SpriteKind;

/// Player jet, nose up
const PLAYER_OUTLINE: [[f32; 2]; 13] = [
    [0.50, 0.00],
    [0.62, 0.35],
    [1.00, 0.62],
    [1.00, 0.74],
    [0.62, 0.68],
    [0.60, 0.88],
    [0.76, 1.00],
    [0.24, 1.00],
    [0.40, 0.88],
    [0.38, 0.68],
    [0.00, 0.74],
    [0.00, 0.62],
    [0.38, 0.35],
];

/// Enemy fighter, nose down, swept wings
const ENEMY_OUTLINE: [[f32; 2]; 10] = [
    [0.50, 1.00],
    [0.36, 0.70],
    [0.00, 0.40],
    [0.00, 0.22],
    [0.34, 0.34],
    [0.40, 0.00],
    [0.60, 0.00],
    [0.66, 0.34],
    [1.00, 0.22],
    [1.00, 0.40],
];

/// Bullet with a pointed tip
const BULLET_OUTLINE: [[f32; 2]; 5] = [
    [0.50, 0.00],
    [1.00, 0.25],
    [1.00, 1.00],
    [0.00, 1.00],
    [0.00, 0.25],
];

/// Unit-square outline for a sprite kind
pub fn unit_outline(kind: SpriteKind) -> &'static [[f32; 2]] {
    match kind {
        SpriteKind::Player => &PLAYER_OUTLINE,
        SpriteKind::Enemy => &ENEMY_OUTLINE,
        SpriteKind::Bullet => &BULLET_OUTLINE,
    }
}

/// Outline stretched over the rectangle at `pos` with `size`
pub fn outline(kind: SpriteKind, pos: Vec2, size: Vec2) -> Vec<Vec2> {
    unit_outline(kind)
        .iter()
        .map(|&[x, y]| pos + Vec2::new(x, y) * size)
        .collect()
}

/// Fill color (CSS)
pub fn fill_color(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Player => "#6cc7ff",
        SpriteKind::Enemy => "#ff5a4f",
        SpriteKind::Bullet => "#ffe066",
    }
}

/// Darker accent used for the cockpit / engine glow
pub fn accent_color(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Player => "#1d5f8a",
        SpriteKind::Enemy => "#7a1c17",
        SpriteKind::Bullet => "#ff9f1c",
    }
}
