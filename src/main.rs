//! Walkabout entry point.
//!
//! A small top-down walking demo built on:
//! - **raylib** for windowing, input and drawing
//! - a minimal in-crate ECS (see [`walkabout::ecs`]) for game state
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if absent) and open the window
//! 2. Load the player's sprite sheets into the texture store
//! 3. Build the [`Game`]: registry, state systems and the player
//! 4. Each frame:
//!    - snapshot the keyboard and run input, movement and animation
//!    - draw into the fixed-resolution render target
//!    - scale the render target into the window, letterboxed
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini --assets ./assets
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use clap::Parser;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use walkabout::error::GameError;
use walkabout::game::{Game, player_animation_set};
use walkabout::resources::gameconfig::GameConfig;
use walkabout::resources::rendertarget::RenderTarget;
use walkabout::resources::spritesheet::SpriteSheet;
use walkabout::resources::texturestore::TextureStore;
use walkabout::systems::render::RaylibSurface;

/// Walkabout: walk a character around with the keyboard.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Directory that sprite paths are relative to.
    #[arg(long, value_name = "DIR", default_value = "./assets")]
    assets: PathBuf,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &Path) -> Result<GameConfig, GameError> {
    let mut config = GameConfig::with_path(path);
    if path.exists() {
        config.load_from_file()?;
    } else {
        log::warn!("{} not found, using default configuration", path.display());
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let config = load_config(&cli.config)?;

    // Early-exit: write config and quit (no window needed)
    if cli.write_config {
        config.save_to_file()?;
        println!("Configuration written to {}", config.config_path.display());
        return Ok(());
    }

    log::info!("Starting {}", config.title);
    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title(&config.title);
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- Sprite sheets ---------------
    let set = player_animation_set()?;
    let mut textures = TextureStore::new();
    let mut sheets: FxHashMap<String, SpriteSheet> = FxHashMap::default();
    for (key, rel_path) in &set.sheets {
        let sheet = textures.load_sheet(&mut rl, &thread, key, &cli.assets.join(rel_path))?;
        sheets.insert(key.clone(), sheet);
    }

    let mut game = Game::new(&config, &sheets)?;
    log::info!("{} textures loaded", textures.len());

    // --------------- Render target for fixed-resolution rendering ---------------
    let (render_width, render_height) = game.layout(rl.get_screen_width(), rl.get_screen_height());
    let mut render_target = RenderTarget::new(&mut rl, &thread, render_width, render_height)?;

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        game.update(&rl);

        let (win_w, win_h) = (rl.get_screen_width(), rl.get_screen_height());
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        {
            let mut canvas = d.begin_texture_mode(&thread, &mut render_target.texture);
            canvas.clear_background(Color::DARKGRAY);
            let mut surface = RaylibSurface::new(&mut canvas, &textures);
            game.draw(&mut surface);
        }
        let src = render_target.source_rect();
        let dest = render_target.dest_rect(win_w, win_h);
        d.draw_texture_pro(
            &render_target.texture,
            src,
            dest,
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );
    }
    Ok(())
}
