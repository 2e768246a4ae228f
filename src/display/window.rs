//! minifb framebuffer backend
//!
//! Renders each scene into a `u32` ARGB buffer and presents it through a
//! minifb window. Sprite images are decoded once at startup; a failed load
//! logs a warning and falls back to a flat-color placeholder, so a missing
//! art file never aborts a session.

use std::collections::HashMap;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use super::{DisplayAdapter, Scene, SpriteKind, SpriteRect};
use crate::error::{GameError, Result};
use crate::settings::Settings;
use crate::sim::{GameKey, InputEvent};

/// Opaque white, matching the original clear color
const CLEAR_COLOR: u32 = 0xffff_ffff;
const TARGET_FPS: usize = 60;

/// Placeholder colors when an asset fails to decode
const FALLBACK_BACKGROUND: u32 = 0xffff_ffff;
const FALLBACK_PLAYER: u32 = 0xff2e_7d32;
const FALLBACK_PROJECTILE: u32 = 0xff1e_88e5;

/// A decoded sprite: RGBA pixels repacked as ARGB words
struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Sprite {
    /// 1x1 flat color; scales to any destination
    fn placeholder(color: u32) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    fn load(path: &str, fallback: u32) -> Self {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                let pixels = rgba
                    .pixels()
                    .map(|p| {
                        let [r, g, b, a] = p.0;
                        u32::from_be_bytes([a, r, g, b])
                    })
                    .collect();
                log::debug!("loaded {path} ({width}x{height})");
                Self {
                    width: width as usize,
                    height: height as usize,
                    pixels,
                }
            }
            Err(e) => {
                log::warn!("unable to load image {path}: {e}; using a flat color");
                Self::placeholder(fallback)
            }
        }
    }
}

/// Window + framebuffer display
pub struct WindowDisplay {
    window: Option<Window>,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    sprites: HashMap<SpriteKind, Sprite>,
    last_mouse: Option<(f32, f32)>,
    closed: bool,
}

impl WindowDisplay {
    /// Open the window and decode the sprite table
    pub fn new(settings: &Settings) -> Result<Self> {
        let width = settings.width as usize;
        let height = settings.height as usize;

        let mut window = Window::new(&settings.title, width, height, WindowOptions::default())
            .map_err(|e| GameError::Init(e.to_string()))?;
        window.set_target_fps(TARGET_FPS);

        let mut sprites = HashMap::new();
        sprites.insert(
            SpriteKind::Background,
            Sprite::load(&settings.background_image, FALLBACK_BACKGROUND),
        );
        sprites.insert(
            SpriteKind::Player,
            Sprite::load(&settings.player_image, FALLBACK_PLAYER),
        );
        sprites.insert(
            SpriteKind::Projectile,
            Sprite::load(&settings.projectile_image, FALLBACK_PROJECTILE),
        );

        Ok(Self {
            window: Some(window),
            buffer: vec![CLEAR_COLOR; width * height],
            width,
            height,
            sprites,
            last_mouse: None,
            closed: false,
        })
    }

    /// Nearest-neighbor blit of a sprite into a destination rectangle.
    /// Fully transparent source pixels are skipped.
    fn blit(&mut self, kind: SpriteKind, x0: i32, y0: i32, w: i32, h: i32) {
        let Some(sprite) = self.sprites.get(&kind) else {
            return;
        };
        for dy in 0..h {
            let py = y0 + dy;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            let sy = (dy as usize * sprite.height) / h as usize;
            for dx in 0..w {
                let px = x0 + dx;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let sx = (dx as usize * sprite.width) / w as usize;
                let pixel = sprite.pixels[sy * sprite.width + sx];
                if pixel >> 24 == 0 {
                    continue;
                }
                self.buffer[py as usize * self.width + px as usize] = pixel;
            }
        }
    }

    fn blit_sprite(&mut self, kind: SpriteKind, dest: &SpriteRect) {
        let size = dest.size.round().max(1.0) as i32;
        self.blit(kind, dest.x.round() as i32, dest.y.round() as i32, size, size);
    }
}

impl DisplayAdapter for WindowDisplay {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let Some(window) = self.window.as_mut() else {
            return events;
        };

        if !window.is_open() {
            events.push(InputEvent::Quit);
            return events;
        }

        // Held movement keys repeat; command keys fire once per press
        for key in window.get_keys_pressed(KeyRepeat::Yes) {
            let mapped = match key {
                Key::Left => Some(GameKey::MoveLeft),
                Key::Right => Some(GameKey::MoveRight),
                Key::Up => Some(GameKey::MoveUp),
                Key::Down => Some(GameKey::MoveDown),
                _ => None,
            };
            if let Some(mapped) = mapped {
                events.push(InputEvent::KeyDown(mapped));
            }
        }
        for key in window.get_keys_pressed(KeyRepeat::No) {
            let mapped = match key {
                Key::E => Some(GameKey::ToggleMouse),
                Key::R => Some(GameKey::Restart),
                Key::X => Some(GameKey::Exit),
                _ => None,
            };
            if let Some(mapped) = mapped {
                events.push(InputEvent::KeyDown(mapped));
            }
        }

        if let Some((x, y)) = window.get_mouse_pos(MouseMode::Discard) {
            if self.last_mouse != Some((x, y)) {
                self.last_mouse = Some((x, y));
                events.push(InputEvent::MouseMove(x, y));
            }
        }

        events
    }

    fn present(&mut self, scene: &Scene) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.buffer.fill(CLEAR_COLOR);
        self.blit(
            SpriteKind::Background,
            0,
            0,
            self.width as i32,
            self.height as i32,
        );
        for rect in &scene.projectiles {
            self.blit_sprite(SpriteKind::Projectile, rect);
        }
        self.blit_sprite(SpriteKind::Player, &scene.player);

        let Some(window) = self.window.as_mut() else {
            return Ok(());
        };
        if let Err(e) = window.update_with_buffer(&self.buffer, self.width, self.height) {
            self.close();
            return Err(GameError::Render(e.to_string()));
        }
        let open = window.is_open();
        if !open {
            self.close();
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        // Release in reverse order of construction; idempotent
        self.sprites.clear();
        if self.window.take().is_some() {
            log::debug!("display closed");
        }
        self.closed = true;
    }
}

impl Drop for WindowDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
