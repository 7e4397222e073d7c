use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{DefaultTerminal, Frame};
use squall_config::Config;
use squall_core::Palette;
use squall_storm::Storm;
use tracing::info;

mod audio;
mod cli;
mod controls;
mod logging;

use crate::audio::Soundscape;
use crate::cli::Args;
use crate::controls::Controls;

/// Time budget of one animation frame (~22 fps).
const FRAME_DELAY: Duration = Duration::from_millis(45);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let config = Config::load(args.config.as_deref())?.with_overrides(args.overrides())?;
    let soundscape = Soundscape::open(&config, args.mute)?;
    let controls = Controls::new();
    controls.install_signal_handlers()?;
    info!(?config, "starting squall");

    let terminal = ratatui::init();
    let result = App::new(&config, soundscape, controls).run(terminal);
    ratatui::restore();
    info!("squall stopped");
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Rain and lightning.
    storm: Storm,
    /// Tone to color lookup.
    palette: Palette,
    /// The one generator every random draw goes through.
    rng: StdRng,
    /// Thunder output.
    soundscape: Soundscape,
    /// Stop and resize requests.
    controls: Controls,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, soundscape: Soundscape, controls: Controls) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            storm: Storm::new(Default::default(), config.lightning_chance),
            palette: Palette::new(config.rain_color, config.lightning_color),
            rng,
            soundscape,
            controls,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.storm.reset(terminal.size()?);
        while !self.controls.should_stop() {
            let deadline = Instant::now() + FRAME_DELAY;
            if self.controls.take_resized() {
                self.storm.reset(terminal.size()?);
                terminal.clear()?;
            }

            let now = Instant::now();
            self.storm.tick(now, &mut self.rng, &mut self.soundscape);
            terminal.draw(|frame| self.render(frame, now))?;
            self.handle_crossterm_events(deadline)?;
        }
        Ok(())
    }

    /// Renders the storm as of `now`.
    fn render(&self, frame: &mut Frame, now: Instant) {
        self.storm.render(frame.buffer_mut(), now, &self.palette);
    }

    /// Reads crossterm events until the frame deadline passes.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || self.controls.should_stop() {
                return Ok(());
            }
            if event::poll(remaining)? {
                self.controls.observe(&event::read()?);
            }
        }
    }
}
