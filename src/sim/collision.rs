//! Collision detection for axis-aligned sprites
//!
//! A sprite "collides with" another when the other sprite's center point
//! lies inside its bounding box. The test is one-sided:
//! `collides_with(enemy, bullet)` asks whether the bullet's center is inside
//! the enemy, not the other way round.

use glam::Vec2;

use super::state::Sprite;

/// Whether `point` lies inside the sprite's rectangle (edges inclusive)
#[inline]
pub fn contains_point(sprite: &Sprite, point: Vec2) -> bool {
    let max = sprite.max();
    point.x >= sprite.pos.x && point.x <= max.x && point.y >= sprite.pos.y && point.y <= max.y
}

/// Whether `other`'s center point lies inside `sprite`
#[inline]
pub fn collides_with(sprite: &Sprite, other: &Sprite) -> bool {
    contains_point(sprite, other.center())
}

/// Whether a touch at `point` grabs the sprite, allowing `deviation` pixels
/// of slack on every side
pub fn grabs(sprite: &Sprite, point: Vec2, deviation: f32) -> bool {
    let min = sprite.pos - Vec2::splat(deviation);
    let max = sprite.max() + Vec2::splat(deviation);
    point.x >= min.x && point.y >= min.y && point.x <= max.x && point.y <= max.y
}

/// Index of the first sprite in `targets` that `projectile` hits
pub fn first_hit<'a, I>(projectile: &Sprite, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Sprite>,
{
    targets
        .into_iter()
        .position(|target| collides_with(target, projectile))
}
