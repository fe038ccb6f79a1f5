//! Per-frame simulation tick
//!
//! One call advances the game by exactly one frame: queued input first,
//! then background, bullets, enemies and finally collisions.

use glam::Vec2;

use super::collision::{collides_with, first_hit, grabs};
use super::input::{InputEvent, restart_button};
use super::state::{GameEvent, GamePhase, GameState};

/// Everything a single tick consumes
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Frame counter from the clock, drives spawn timing
    pub frame: u64,
    /// Input queued since the previous tick, oldest first
    pub events: Vec<InputEvent>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    for event in &input.events {
        apply_input(state, *event);
    }

    // Everything holds still until the restart tap
    if state.phase == GamePhase::GameOver {
        return;
    }

    scroll_background(state);
    advance_bullets(state, input.frame);
    advance_enemies(state, input.frame);
    resolve_collisions(state);
}

fn apply_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::TouchStart { pos } => match state.phase {
            GamePhase::GameOver => {
                if restart_button(&state.viewport).contains(pos) {
                    restart(state);
                }
            }
            GamePhase::Playing => {
                if grabs(&state.player, pos, state.tuning.grab_deviation) {
                    state.touch.begin();
                }
            }
        },
        InputEvent::TouchMove { pos } => {
            if state.phase == GamePhase::Playing && state.touch.is_dragging() {
                let viewport = state.viewport;
                state.player.center_on_clamped(pos, &viewport);
            }
        }
        InputEvent::TouchEnd => state.touch.end(),
    }
}

fn restart(state: &mut GameState) {
    log::info!("Restarting after game over (score {})", state.score);
    state.reset();
    state.emit(GameEvent::Restarted);
}

fn scroll_background(state: &mut GameState) {
    let bg = &mut state.background;
    bg.top = if bg.top > state.viewport.height {
        0.0
    } else {
        bg.top + state.tuning.bg_scroll_speed
    };
}

fn advance_bullets(state: &mut GameState, frame: u64) {
    let step = Vec2::new(0.0, -state.tuning.bullet_speed);
    let viewport = state.viewport;
    for bullet in &mut state.bullets {
        bullet.pos += step;
    }
    state.bullets.retain(|b| !b.is_off_screen(&viewport));

    if frame.is_multiple_of(state.tuning.bullet_interval) {
        state.spawn_bullet();
    }
}

fn advance_enemies(state: &mut GameState, frame: u64) {
    let viewport = state.viewport;
    for enemy in &mut state.enemies {
        enemy.sprite.pos.y += enemy.speed;
    }
    state.enemies.retain(|e| !e.sprite.is_off_screen(&viewport));

    if frame.is_multiple_of(state.tuning.enemy_interval) {
        state.spawn_enemy();
    }
}

fn resolve_collisions(state: &mut GameState) {
    // Each bullet takes out at most the first enemy it hits and is spent
    let mut destroyed: Vec<Vec2> = Vec::new();
    let enemies = &mut state.enemies;
    state.bullets.retain(|bullet| {
        match first_hit(bullet, enemies.iter().map(|e| &e.sprite)) {
            Some(index) => {
                destroyed.push(enemies.remove(index).sprite.center());
                false
            }
            None => true,
        }
    });

    for pos in destroyed {
        state.score += 1;
        state.emit(GameEvent::EnemyDestroyed { pos });
    }

    let player = state.player;
    if state.enemies.iter().any(|e| collides_with(&player, &e.sprite)) {
        state.phase = GamePhase::GameOver;
        state.touch.end();
        log::info!("Game over! Final score: {}", state.score);
        state.emit(GameEvent::GameOver { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::{Enemy, Sprite, SpriteKind, Viewport};
    use proptest::prelude::*;

    const W: f32 = 400.0;
    const H: f32 = 800.0;

    fn new_state() -> GameState {
        GameState::new(Viewport::new(W, H), Tuning::default(), 12345)
    }

    /// A frame number that spawns nothing
    const QUIET: u64 = 1;

    fn quiet() -> TickInput {
        TickInput {
            frame: QUIET,
            events: Vec::new(),
        }
    }

    fn with_events(events: Vec<InputEvent>) -> TickInput {
        TickInput {
            frame: QUIET,
            events,
        }
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            sprite: Sprite::new(SpriteKind::Enemy, Vec2::new(x, y), Vec2::new(60.0, 60.0)),
            speed: 6.0,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Sprite {
        Sprite::new(SpriteKind::Bullet, Vec2::new(x, y), Vec2::new(16.0, 30.0))
    }

    fn grab(state: &GameState) -> InputEvent {
        InputEvent::TouchStart {
            pos: state.player.center(),
        }
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = new_state();
        // Short enough that nothing meets yet
        for frame in 0..=40 {
            tick(
                &mut state,
                &TickInput {
                    frame,
                    events: Vec::new(),
                },
            );
        }
        // Frames 0, 20, 40 fire; frames 0, 30 spawn enemies
        assert_eq!(state.bullets.len(), 3);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_shot_event_per_bullet() {
        let mut state = new_state();
        tick(
            &mut state,
            &TickInput {
                frame: 0,
                events: Vec::new(),
            },
        );
        let events = state.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::BulletFired { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_movement_steps() {
        let mut state = new_state();
        state.bullets.push(bullet_at(10.0, 300.0));
        state.enemies.push(enemy_at(300.0, 100.0));
        tick(&mut state, &quiet());
        assert_eq!(state.bullets[0].pos.y, 294.0);
        assert_eq!(state.enemies[0].sprite.pos.y, 106.0);
        assert_eq!(state.background.top, 2.0);
    }

    #[test]
    fn test_background_wraps() {
        let mut state = new_state();
        state.background.top = H;
        tick(&mut state, &quiet());
        assert_eq!(state.background.top, H + 2.0);
        tick(&mut state, &quiet());
        assert_eq!(state.background.top, 0.0);
    }

    #[test]
    fn test_bullet_removed_when_fully_off_top() {
        let mut state = new_state();
        state.bullets.push(bullet_at(10.0, -24.0));
        tick(&mut state, &quiet());
        // Bottom edge now exactly at 0
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &quiet());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_removed_when_fully_off_bottom() {
        let mut state = new_state();
        state.enemies.push(enemy_at(0.0, H - 6.0));
        tick(&mut state, &quiet());
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &quiet());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_bullet_kills_enemy() {
        let mut state = new_state();
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(120.0, 130.0));
        tick(&mut state, &quiet());
        assert_eq!(state.score, 1);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        let events = state.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::EnemyDestroyed { .. }]));
    }

    #[test]
    fn test_one_enemy_per_bullet() {
        let mut state = new_state();
        // Two stacked enemies both contain the bullet's center
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(105.0, 105.0));
        state.bullets.push(bullet_at(120.0, 130.0));
        tick(&mut state, &quiet());
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].sprite.pos, Vec2::new(105.0, 111.0));
    }

    #[test]
    fn test_two_bullets_one_enemy() {
        let mut state = new_state();
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(120.0, 130.0));
        state.bullets.push(bullet_at(125.0, 130.0));
        tick(&mut state, &quiet());
        assert_eq!(state.score, 1);
        // The second bullet finds nothing left to hit
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_hits_player() {
        let mut state = new_state();
        let p = state.player.pos;
        state.enemies.push(enemy_at(p.x + 10.0, p.y - 6.0));
        tick(&mut state, &quiet());
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_drag_moves_player() {
        let mut state = new_state();
        let start = grab(&state);
        tick(
            &mut state,
            &with_events(vec![start, InputEvent::TouchMove {
                pos: Vec2::new(100.0, 300.0),
            }]),
        );
        assert_eq!(state.player.center(), Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_drag_needs_grab() {
        let mut state = new_state();
        let before = state.player;
        tick(
            &mut state,
            &with_events(vec![
                InputEvent::TouchStart {
                    pos: Vec2::new(5.0, 5.0),
                },
                InputEvent::TouchMove {
                    pos: Vec2::new(100.0, 300.0),
                },
            ]),
        );
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_touch_end_stops_drag() {
        let mut state = new_state();
        let start = grab(&state);
        tick(
            &mut state,
            &with_events(vec![
                start,
                InputEvent::TouchEnd,
                InputEvent::TouchMove {
                    pos: Vec2::new(100.0, 300.0),
                },
            ]),
        );
        assert_eq!(state.player, state.initial_player());
    }

    #[test]
    fn test_drag_clamped() {
        let mut state = new_state();
        let start = grab(&state);
        tick(
            &mut state,
            &with_events(vec![start, InputEvent::TouchMove {
                pos: Vec2::new(-500.0, 5000.0),
            }]),
        );
        assert_eq!(state.player.pos, Vec2::new(0.0, H - 80.0));
    }

    fn game_over_state() -> GameState {
        let mut state = new_state();
        state.score = 9;
        state.bullets.push(bullet_at(10.0, 300.0));
        state.enemies.push(enemy_at(300.0, 100.0));
        state.phase = GamePhase::GameOver;
        state
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = game_over_state();
        let start = grab(&state);
        let before = state.clone();
        for frame in 0..90 {
            tick(
                &mut state,
                &TickInput {
                    frame,
                    events: vec![start, InputEvent::TouchMove {
                        pos: Vec2::new(10.0, 10.0),
                    }],
                },
            );
        }
        assert_eq!(state.player, before.player);
        assert_eq!(state.bullets, before.bullets);
        assert_eq!(state.enemies, before.enemies);
        assert_eq!(state.background, before.background);
        assert_eq!(state.score, 9);
    }

    #[test]
    fn test_restart_tap_resets() {
        let mut state = game_over_state();
        state.player.pos = Vec2::new(0.0, 0.0);
        let button = restart_button(&state.viewport);
        tick(
            &mut state,
            &TickInput {
                frame: QUIET,
                events: vec![InputEvent::TouchStart {
                    pos: button.center(),
                }],
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player, state.initial_player());
        assert!(state.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_tap_outside_button_ignored() {
        let mut state = game_over_state();
        tick(
            &mut state,
            &with_events(vec![InputEvent::TouchStart {
                pos: Vec2::new(1.0, 1.0),
            }]),
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 9);
    }

    #[test]
    fn test_restart_tap_while_playing_ignored() {
        let mut state = new_state();
        state.score = 4;
        let button = restart_button(&state.viewport);
        tick(
            &mut state,
            &with_events(vec![InputEvent::TouchStart {
                pos: button.center(),
            }]),
        );
        assert_eq!(state.score, 4);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_viewport(
            w in 50.0f32..2000.0,
            h in 50.0f32..2000.0,
            moves in prop::collection::vec((-3000.0f32..3000.0, -3000.0f32..3000.0), 1..20),
        ) {
            let mut state = GameState::new(Viewport::new(w, h), Tuning::default(), 1);
            let mut events = vec![grab(&state)];
            events.extend(moves.iter().map(|&(x, y)| InputEvent::TouchMove { pos: Vec2::new(x, y) }));
            for event in events {
                tick(&mut state, &with_events(vec![event]));
                if state.phase == GamePhase::GameOver {
                    break;
                }
                let p = state.player;
                prop_assert!(p.pos.x >= 0.0 && p.pos.y >= 0.0);
                prop_assert!(p.pos.x <= (w - p.size.x).max(0.0));
                prop_assert!(p.pos.y <= (h - p.size.y).max(0.0));
            }
        }

        #[test]
        fn prop_culling_matches_visibility(
            bullet_y in -100.0f32..900.0,
            enemy_y in -100.0f32..900.0,
        ) {
            let mut state = new_state();
            // Park the player out of the way of the test sprites
            state.player.pos = Vec2::new(300.0, 0.0);
            state.bullets.push(bullet_at(0.0, bullet_y));
            state.enemies.push(enemy_at(150.0, enemy_y));
            tick(&mut state, &quiet());

            let moved_bullet = bullet_at(0.0, bullet_y - 6.0);
            let moved_enemy = enemy_at(150.0, enemy_y + 6.0);
            let vp = state.viewport;
            prop_assert_eq!(state.bullets.len(), usize::from(!moved_bullet.is_off_screen(&vp)));
            prop_assert_eq!(state.enemies.len(), usize::from(!moved_enemy.sprite.is_off_screen(&vp)));
        }

        #[test]
        fn prop_score_counts_removed_enemies(
            bullets in prop::collection::vec((0.0f32..380.0, 100.0f32..500.0), 0..12),
            enemies in prop::collection::vec((0.0f32..340.0, 100.0f32..500.0), 0..12),
        ) {
            let mut state = new_state();
            state.bullets.extend(bullets.iter().map(|&(x, y)| bullet_at(x, y)));
            state.enemies.extend(enemies.iter().map(|&(x, y)| enemy_at(x, y)));
            tick(&mut state, &quiet());

            let removed = enemies.len() - state.enemies.len();
            prop_assert_eq!(state.score, removed as u64);
            prop_assert!(removed <= bullets.len());
            prop_assert_eq!(bullets.len() - state.bullets.len(), removed);
        }
    }
}
