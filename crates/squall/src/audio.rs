//! Thunder (and, with the `audio` feature, rain) sounds.

use std::io::{self, Write};

use color_eyre::Result;
use squall_config::Config;
use squall_storm::ThunderSink;
use tracing::{info, warn};

/// Where thunder goes when a bolt spawns.
#[derive(Debug)]
pub enum Soundscape {
    /// No sound at all.
    Silent,
    /// Ring the terminal bell.
    Bell,
    /// Sample playback through the default output device.
    #[cfg(feature = "audio")]
    Deck(deck::Deck),
}

impl Soundscape {
    /// Pick the sound output for this run.
    ///
    /// Fails when the `audio` feature is enabled and the samples or the
    /// output device are unavailable.
    pub fn open(config: &Config, mute: bool) -> Result<Self> {
        let soundscape = if mute {
            Self::Silent
        } else {
            Self::open_output(config)?
        };
        info!(output = soundscape.label(), "sound ready");
        Ok(soundscape)
    }

    #[cfg(feature = "audio")]
    fn open_output(config: &Config) -> Result<Self> {
        Ok(Self::Deck(deck::Deck::open(config)?))
    }

    #[cfg(not(feature = "audio"))]
    fn open_output(config: &Config) -> Result<Self> {
        if config.thunder_volume > 0.0 {
            Ok(Self::Bell)
        } else {
            Ok(Self::Silent)
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Bell => "bell",
            #[cfg(feature = "audio")]
            Self::Deck(_) => "samples",
        }
    }
}

impl ThunderSink for Soundscape {
    fn thunder(&mut self) {
        match self {
            Self::Silent => {}
            Self::Bell => {
                let mut out = io::stdout();
                if let Err(err) = out.write_all(b"\x07").and_then(|()| out.flush()) {
                    warn!(%err, "failed to ring terminal bell");
                }
            }
            #[cfg(feature = "audio")]
            Self::Deck(deck) => deck.thunder(),
        }
    }
}

#[cfg(feature = "audio")]
mod deck {
    use std::env;
    use std::fmt;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use color_eyre::Result;
    use color_eyre::eyre::{WrapErr, eyre};
    use directories::ProjectDirs;
    use rodio::source::Buffered;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use squall_config::Config;
    use tracing::warn;

    const RAIN_SAMPLE: &str = "sounds/rain.wav";
    const THUNDER_SAMPLE: &str = "sounds/thunder.wav";

    /// Overrides the installed data directory.
    const DATA_DIR_ENV: &str = "SQUALL_DATA_DIR";

    type Sample = Decoder<BufReader<File>>;

    /// Rain loop plus a decoded thunder clap ready to replay.
    pub struct Deck {
        /// Dropping the stream silences everything.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        _rain: Sink,
        thunder: Buffered<Sample>,
        thunder_volume: f32,
    }

    impl fmt::Debug for Deck {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Deck")
                .field("thunder_volume", &self.thunder_volume)
                .finish_non_exhaustive()
        }
    }

    impl Deck {
        pub fn open(config: &Config) -> Result<Self> {
            let rain_path = find_asset(RAIN_SAMPLE)
                .ok_or_else(|| eyre!("could not find sound asset {RAIN_SAMPLE}"))?;
            let thunder_path = find_asset(THUNDER_SAMPLE)
                .ok_or_else(|| eyre!("could not find sound asset {THUNDER_SAMPLE}"))?;

            let (stream, handle) =
                OutputStream::try_default().wrap_err("failed to open audio output")?;

            let rain = Sink::try_new(&handle).wrap_err("failed to create rain sink")?;
            rain.append(decode(&rain_path)?.repeat_infinite());
            rain.set_volume(config.rain_volume / 100.0);

            Ok(Self {
                _stream: stream,
                handle,
                _rain: rain,
                thunder: decode(&thunder_path)?.buffered(),
                thunder_volume: config.thunder_volume / 100.0,
            })
        }

        /// Start a thunder clap; overlapping claps mix.
        pub fn thunder(&mut self) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(self.thunder_volume);
                    sink.append(self.thunder.clone());
                    sink.detach();
                }
                Err(err) => warn!(%err, "failed to play thunder"),
            }
        }
    }

    fn decode(path: &Path) -> Result<Sample> {
        let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
        Decoder::new(BufReader::new(file))
            .wrap_err_with(|| format!("failed to decode {}", path.display()))
    }

    /// Look for `asset` in the working directory, then `$SQUALL_DATA_DIR`,
    /// then the platform data directory.
    fn find_asset(asset: &str) -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from(asset)];
        if let Some(dir) = env::var_os(DATA_DIR_ENV) {
            candidates.push(PathBuf::from(dir).join(asset));
        }
        if let Some(dirs) = ProjectDirs::from("", "", "squall") {
            candidates.push(dirs.data_dir().join(asset));
        }
        candidates.into_iter().find(|path| path.is_file())
    }
}
