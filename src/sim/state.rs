//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::TouchTracker;
use crate::consts::{BG_HEIGHT, BG_WIDTH};
use crate::tuning::Tuning;
use crate::clamp_range;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; waiting for a restart tap
    GameOver,
}

/// Drawing surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Which artwork a sprite is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Bullet,
    Enemy,
}

/// An axis-aligned drawable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Sprite {
    pub fn new(kind: SpriteKind, pos: Vec2, size: Vec2) -> Self {
        Self { kind, pos, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// True once no part of the sprite overlaps the viewport
    pub fn is_off_screen(&self, viewport: &Viewport) -> bool {
        let max = self.max();
        max.y < 0.0 || self.pos.y > viewport.height || max.x < 0.0 || self.pos.x > viewport.width
    }

    /// Move so the center sits at `center`, kept inside the viewport
    pub fn center_on_clamped(&mut self, center: Vec2, viewport: &Viewport) {
        let target = center - self.size / 2.0;
        self.pos = Vec2::new(
            clamp_range(target.x, 0.0, viewport.width - self.size.x),
            clamp_range(target.y, 0.0, viewport.height - self.size.y),
        );
    }
}

/// A descending enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub sprite: Sprite,
    /// Pixels per tick, downward
    pub speed: f32,
}

/// Scrolling backdrop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Scroll offset, wraps at the viewport height
    pub top: f32,
    /// Source tile size
    pub size: Vec2,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            top: 0.0,
            size: Vec2::new(BG_WIDTH, BG_HEIGHT),
        }
    }
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletFired { pos: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    GameOver { score: u64 },
    Restarted,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub background: Background,
    pub player: Sprite,
    /// In spawn order
    pub bullets: Vec<Sprite>,
    /// In spawn order
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub phase: GamePhase,
    /// Finger drag in progress
    pub touch: TouchTracker,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(viewport: Viewport, tuning: Tuning, seed: u64) -> Self {
        Self {
            player: initial_player(&viewport, &tuning),
            viewport,
            tuning,
            background: Background::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            phase: GamePhase::Playing,
            touch: TouchTracker::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Return every gameplay field to its initial value.
    ///
    /// The RNG keeps running so the next run gets a fresh enemy pattern.
    /// Events not yet drained survive the reset.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let events = std::mem::take(&mut self.events);
        *self = Self {
            rng,
            events,
            ..Self::new(self.viewport, self.tuning.clone(), self.seed)
        };
    }

    /// Apply a new viewport size and keep the player on screen
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!(
            "Viewport resized: {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        let center = self.player.center();
        self.player.center_on_clamped(center, &viewport);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Where the player starts: centered, just above the bottom margin
    pub fn initial_player(&self) -> Sprite {
        initial_player(&self.viewport, &self.tuning)
    }

    /// Append a bullet centered above the player
    pub fn spawn_bullet(&mut self) {
        let size = self.tuning.bullet_size;
        let pos = Vec2::new(
            self.player.pos.x + self.player.size.x / 2.0 - size.x / 2.0,
            self.player.pos.y - size.y,
        );
        self.bullets.push(Sprite::new(SpriteKind::Bullet, pos, size));
        self.emit(GameEvent::BulletFired { pos });
    }

    /// Append an enemy just above the top edge at a random column
    pub fn spawn_enemy(&mut self) {
        let size = self.tuning.enemy_size;
        let max_x = (self.viewport.width - size.x).max(0.0);
        let x = if max_x > 0.0 {
            self.rng.random_range(0.0..max_x).floor()
        } else {
            0.0
        };
        self.enemies.push(Enemy {
            sprite: Sprite::new(SpriteKind::Enemy, Vec2::new(x, -size.y), size),
            speed: self.tuning.enemy_speed,
        });
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn initial_player(viewport: &Viewport, tuning: &Tuning) -> Sprite {
    let size = tuning.player_size;
    let pos = Vec2::new(
        clamp_range(viewport.width / 2.0 - size.x / 2.0, 0.0, viewport.width - size.x),
        clamp_range(
            viewport.height - size.y - tuning.player_bottom_margin,
            0.0,
            viewport.height - size.y,
        ),
    );
    Sprite::new(SpriteKind::Player, pos, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Viewport::new(400.0, 800.0), Tuning::default(), 7)
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert!(s.bullets.is_empty());
        assert!(s.enemies.is_empty());
        assert_eq!(s.player.pos, Vec2::new(160.0, 690.0));
        assert_eq!(s.background.top, 0.0);
    }

    #[test]
    fn test_off_screen_edges() {
        let vp = Viewport::new(400.0, 800.0);
        let size = Vec2::new(10.0, 10.0);
        // Touching the top edge from above is still on screen
        assert!(!Sprite::new(SpriteKind::Enemy, Vec2::new(0.0, -10.0), size).is_off_screen(&vp));
        assert!(Sprite::new(SpriteKind::Enemy, Vec2::new(0.0, -10.5), size).is_off_screen(&vp));
        assert!(!Sprite::new(SpriteKind::Enemy, Vec2::new(0.0, 800.0), size).is_off_screen(&vp));
        assert!(Sprite::new(SpriteKind::Enemy, Vec2::new(0.0, 800.5), size).is_off_screen(&vp));
        assert!(Sprite::new(SpriteKind::Enemy, Vec2::new(401.0, 5.0), size).is_off_screen(&vp));
    }

    #[test]
    fn test_spawn_bullet_above_player() {
        let mut s = state();
        s.spawn_bullet();
        let b = s.bullets[0];
        assert_eq!(b.pos, Vec2::new(192.0, 660.0));
        assert_eq!(b.max().y, s.player.pos.y);
        let events = s.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::BulletFired { .. }]));
    }

    #[test]
    fn test_spawn_enemy_in_columns() {
        let mut s = state();
        for _ in 0..200 {
            s.spawn_enemy();
        }
        for e in &s.enemies {
            assert!(e.sprite.pos.x >= 0.0 && e.sprite.pos.x <= 340.0);
            assert_eq!(e.sprite.pos.x.fract(), 0.0);
            assert_eq!(e.sprite.pos.y, -60.0);
            assert_eq!(e.speed, 6.0);
        }
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let mut a = state();
        let mut b = state();
        for _ in 0..10 {
            a.spawn_enemy();
            b.spawn_enemy();
        }
        assert_eq!(a.enemies, b.enemies);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut s = state();
        s.spawn_enemy();
        s.spawn_bullet();
        s.score = 12;
        s.phase = GamePhase::GameOver;
        s.player.pos = Vec2::new(3.0, 4.0);
        s.background.top = 99.0;
        s.reset();
        assert_eq!(s.score, 0);
        assert!(s.bullets.is_empty() && s.enemies.is_empty());
        assert_eq!(s.player, s.initial_player());
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.background.top, 0.0);
    }

    #[test]
    fn test_resize_keeps_player_inside() {
        let mut s = state();
        s.resize(Viewport::new(200.0, 300.0));
        assert!(s.player.max().x <= 200.0);
        assert!(s.player.max().y <= 300.0);
        assert!(s.player.pos.x >= 0.0 && s.player.pos.y >= 0.0);
    }
}
