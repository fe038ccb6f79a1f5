//! 2D canvas backend

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use web_sys::CanvasRenderingContext2d;

use super::DrawCommand;
use super::shapes;
use crate::sim::{Region, SpriteKind, Viewport};

const STAR_COUNT: usize = 90;
/// Fixed so the sky looks the same every session
const STAR_SEED: u64 = 0x5eed_57a2;
const SKY_COLOR: &str = "#0b1026";

/// A star in unit coordinates
struct Star {
    pos: Vec2,
    radius: f32,
    alpha: f32,
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    stars: Vec<Star>,
    /// Canvas pixels per CSS pixel
    pixel_ratio: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, pixel_ratio: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(STAR_SEED);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>(), rng.random::<f32>()),
                radius: rng.random_range(0.5..2.0),
                alpha: rng.random_range(0.3..1.0),
            })
            .collect();
        Self {
            ctx,
            stars,
            pixel_ratio,
        }
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
    }

    /// Execute a frame's draw list
    pub fn draw(&self, viewport: &Viewport, commands: &[DrawCommand]) {
        let ctx = &self.ctx;
        let r = self.pixel_ratio;
        if let Err(e) = ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0) {
            log::warn!("set_transform failed: {:?}", e);
        }
        ctx.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        for command in commands {
            match command {
                DrawCommand::Background { top } => self.draw_background(viewport, *top),
                DrawCommand::Sprite { kind, pos, size } => self.draw_sprite(*kind, *pos, *size),
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    align,
                    color,
                } => {
                    ctx.set_font(&format!("bold {}px sans-serif", size));
                    ctx.set_text_align(align.as_str());
                    ctx.set_text_baseline("top");
                    ctx.set_fill_style_str(color);
                    ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
                }
                DrawCommand::Dim { alpha } => {
                    ctx.set_fill_style_str(&format!("rgba(0,0,0,{})", alpha));
                    ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
                }
                DrawCommand::Button { region, label } => self.draw_button(region, label),
            }
        }
    }

    /// Sky plus two copies of the starfield, one scrolled in from above
    fn draw_background(&self, viewport: &Viewport, top: f32) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(SKY_COLOR);
        ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        let size = viewport.size();
        for offset in [top - size.y, top] {
            for star in &self.stars {
                let p = star.pos * size + Vec2::new(0.0, offset);
                if p.y < -star.radius || p.y > size.y + star.radius {
                    continue;
                }
                ctx.set_global_alpha(star.alpha as f64);
                ctx.set_fill_style_str("#ffffff");
                ctx.fill_rect(
                    (p.x - star.radius) as f64,
                    (p.y - star.radius) as f64,
                    (star.radius * 2.0) as f64,
                    (star.radius * 2.0) as f64,
                );
            }
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_sprite(&self, kind: SpriteKind, pos: Vec2, size: Vec2) {
        let ctx = &self.ctx;
        let points = shapes::outline(kind, pos, size);
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
        ctx.set_fill_style_str(shapes::fill_color(kind));
        ctx.fill();

        // Cockpit / core
        let core = pos + size * Vec2::new(0.4, 0.4);
        let core_size = size * 0.2;
        ctx.set_fill_style_str(shapes::accent_color(kind));
        ctx.fill_rect(
            core.x as f64,
            core.y as f64,
            core_size.x as f64,
            core_size.y as f64,
        );
    }

    fn draw_button(&self, region: &Region, label: &str) {
        let ctx = &self.ctx;
        let size = region.size();
        ctx.set_fill_style_str("#ffcc33");
        ctx.fill_rect(
            region.min.x as f64,
            region.min.y as f64,
            size.x as f64,
            size.y as f64,
        );
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(2.0);
        ctx.stroke_rect(
            region.min.x as f64,
            region.min.y as f64,
            size.x as f64,
            size.y as f64,
        );

        let center = region.center();
        ctx.set_font("bold 24px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("#0b1026");
        ctx.fill_text(label, center.x as f64, center.y as f64).ok();
    }
}
