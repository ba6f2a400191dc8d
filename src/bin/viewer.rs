//! Terminal viewer - paints world snapshots while the simulation runs
//!
//! Presentation only: everything drawn here comes from the read-only snapshot
//! surface and the terrain grid; the simulation core never knows whether a
//! frame was rendered.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Terminal;

use coexist::core::config::WorldConfig;
use coexist::core::error::Result;
use coexist::core::types::Coord;
use coexist::simulation::tick::run_simulation_tick;
use coexist::world::snapshot::{EntityKind, TerrainSnapshot, WorldSnapshot};
use coexist::world::World;

#[derive(Parser, Debug)]
#[command(name = "viewer", about = "Terminal viewer for the coexist simulation")]
struct Args {
    /// RNG seed; defaults to wall-clock seconds
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file; without one a terminal-sized world is used
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds per tick/frame
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,
}

/// Default world sized for a terminal canvas rather than a full screen
fn viewer_config() -> WorldConfig {
    let mut config = WorldConfig::default();
    config.width = 240;
    config.height = 135;
    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WorldConfig::from_toml_file(path)?,
        None => viewer_config(),
    };
    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut world = World::generate(config, seed)?;

    // Terrain never changes; collect the land points once
    let terrain = TerrainSnapshot::capture(&world);
    let height = world.config.height as f64;
    let mut land_points = Vec::new();
    for x in 0..world.config.width as i32 {
        for y in 0..world.config.height as i32 {
            if terrain.is_land(Coord::new(x, y)) {
                land_points.push((x as f64, height - 1.0 - y as f64));
            }
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_viewer(&mut terminal, &mut world, &land_points, args.tick_ms);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_viewer(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    world: &mut World,
    land_points: &[(f64, f64)],
    tick_ms: u64,
) -> Result<()> {
    let width = world.config.width as f64;
    let height = world.config.height as f64;
    let mut paused = false;

    loop {
        let snapshot = WorldSnapshot::capture(world);

        let mut plant_points = Vec::new();
        let mut herbivore_points = Vec::new();
        let mut predator_points = Vec::new();
        for entity in &snapshot.entities {
            let point = (entity.x as f64, height - 1.0 - entity.y as f64);
            match entity.kind {
                EntityKind::Plant => plant_points.push(point),
                EntityKind::Herbivore => herbivore_points.push(point),
                EntityKind::Predator => predator_points.push(point),
            }
        }

        let title = format!(
            " coexist | tick {} | herbivores {} | predators {} | plants {} | [space] pause [q] quit ",
            snapshot.tick,
            herbivore_points.len(),
            predator_points.len(),
            plant_points.len(),
        );

        terminal.draw(|frame| {
            let canvas = Canvas::default()
                .block(Block::default().borders(Borders::ALL).title(title))
                .x_bounds([0.0, width])
                .y_bounds([0.0, height])
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: land_points,
                        color: Color::Green,
                    });
                    ctx.draw(&Points {
                        coords: &plant_points,
                        color: Color::LightGreen,
                    });
                    ctx.draw(&Points {
                        coords: &herbivore_points,
                        color: Color::White,
                    });
                    ctx.draw(&Points {
                        coords: &predator_points,
                        color: Color::Red,
                    });
                });
            frame.render_widget(canvas, frame.size());
        })?;

        if event::poll(Duration::from_millis(tick_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => paused = !paused,
                        _ => {}
                    }
                }
            }
        }

        if !paused {
            run_simulation_tick(world);
        }
    }

    Ok(())
}
