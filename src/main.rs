use log::{error, info, warn};
use raylib::prelude::*;

use raynge::audio::music::{BackgroundMusic, Loudspeaker, SoundIndex};
use raynge::audio::speaker::RodioSpeaker;
use raynge::core::player::ShotOutcome;
use raynge::core::world::World;
use raynge::render::frame_canvas::FrameCanvas;
use raynge::render::framebuffer::Framebuffer;
use raynge::render::hud::{Hud, HudText};
use raynge::render::projection::ProjectionPlane;
use raynge::render::textures::TextureManager;
use raynge::{GameConfig, RayngeError};

fn draw_hud_text(d: &mut RaylibDrawHandle, text: &HudText) {
    d.draw_text(&text.text, text.column, text.row, text.size, Color::WHITE);
}

fn run() -> raynge::Result<()> {
    let config = GameConfig::default();
    let level = std::env::args().nth(1).unwrap_or_else(|| config.level_path.clone());
    let mut world = World::load_file(&level, &config)?;

    let plane = ProjectionPlane::from_config(&config);
    let hud = Hud;
    let mut music = BackgroundMusic::default();
    let mut speaker = RodioSpeaker::new();
    match speaker.as_mut() {
        Some(s) => s.load_sounds_auto(),
        None => warn!("no audio device, playing silent"),
    }

    let (width, height) = (i32::from(config.screen_width), i32::from(config.screen_height));
    let (mut window, raylib_thread) = raylib::init().size(width, height).title("Shooting Raynge").build();
    window.set_target_fps(60);
    info!("window {}x{}", width, height);

    let textures = TextureManager::load();
    let mut framebuffer = Framebuffer::new(width as u32, height as u32);
    let blank = Image::gen_image_color(width, height, Color::BLACK);
    let mut screen = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| RayngeError::Graphics(e.to_string()))?;

    let mut paused = false;
    let mut escaped = false;

    while !window.window_should_close() {
        if window.is_key_pressed(KeyboardKey::KEY_P) {
            paused = !paused;
        }

        if !paused && !escaped {
            if window.is_key_down(KeyboardKey::KEY_UP) {
                world.player.advance(1.0, &world.grid);
            }
            if window.is_key_down(KeyboardKey::KEY_DOWN) {
                world.player.advance(-1.0, &world.grid);
            }
            if window.is_key_down(KeyboardKey::KEY_LEFT) {
                world.player.turn(-1.0);
            }
            if window.is_key_down(KeyboardKey::KEY_RIGHT) {
                world.player.turn(1.0);
            }

            if window.is_key_pressed(KeyboardKey::KEY_SPACE) {
                let target = FrameCanvas::new(&mut framebuffer, &textures, config.cell_size, config.sprite_size);
                let outcome = world.player.shoot(&world.grid, &mut world.objects, &target)?;
                if outcome != ShotOutcome::NoAmmo {
                    if let Some(s) = speaker.as_mut() {
                        s.play_effect(SoundIndex::GunShot);
                    }
                }
            }

            if world.endgame() {
                escaped = true;
                info!("escaped with {} kills", world.player.kills);
            }
        }

        // The music goes on during pauses.
        if let Some(s) = speaker.as_mut() {
            music.play_more_music(s, &world.objects, &world.player, config.cell_size);
        }

        framebuffer.paint_ceiling_and_floor();
        {
            let mut canvas = FrameCanvas::new(&mut framebuffer, &textures, config.cell_size, config.sprite_size);
            plane.project_objects(&world.grid, &world.objects, &world.player, &mut canvas);
        }
        framebuffer.draw_crosshair(Color::WHITE);
        framebuffer.upload_to_texture(&mut screen);

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
        draw_hud_text(&mut d, &hud.display(&world.player));
        if paused {
            draw_hud_text(&mut d, &hud.alert_pause());
        }
        if escaped {
            draw_hud_text(&mut d, &hud.alert_endgame());
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
