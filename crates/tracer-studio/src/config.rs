use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};

use tracer_engine::coords::{ColorRgba, PixelSize};

/// Side of one glob in canvas units.
pub const GLOB_SIZE: f32 = 64.0;

/// Canvas size in globs.
pub const CANVAS_GLOBS: (u32, u32) = (8, 6);

/// Alpha shared by every swatch.
const SWATCH_ALPHA: f32 = 0.4;

const SWATCHES: [(u8, u8, u8); 5] = [
    (56, 148, 133),
    (58, 76, 146),
    (160, 44, 114),
    (35, 190, 14),
    (150, 219, 138),
];

/// Studio configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub glob_size: f32,
    pub canvas_globs: (u32, u32),
    /// Colors selectable with the digit keys, `1` first.
    pub palette: Vec<ColorRgba>,
    pub initial_color: ColorRgba,
    /// `env_logger` filter overriding `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        let palette: Vec<ColorRgba> = SWATCHES
            .iter()
            .map(|&(r, g, b)| ColorRgba::from_rgb_u8(r, g, b, SWATCH_ALPHA))
            .collect();

        Self {
            glob_size: GLOB_SIZE,
            canvas_globs: CANVAS_GLOBS,
            initial_color: palette[0],
            palette,
            log_filter: None,
        }
    }
}

impl StudioConfig {
    /// Canvas size in pixels at scale 1.
    pub fn canvas_size(&self) -> PixelSize {
        PixelSize::from_f32(
            self.canvas_globs.0 as f32 * self.glob_size,
            self.canvas_globs.1 as f32 * self.glob_size,
        )
    }

    /// Palette entry for a digit key (`1` is the first swatch).
    pub fn swatch(&self, digit: u8) -> Option<ColorRgba> {
        let index = usize::from(digit).checked_sub(1)?;
        self.palette.get(index).copied()
    }

    /// Reads the process command line; prints usage and exits on `--help`
    /// or unknown flags.
    pub fn from_env() -> Result<Self> {
        Self::from_matches(&command().get_matches())
    }

    /// Builds the config from command-line arguments (program name first).
    #[cfg(test)]
    fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command()
            .try_get_matches_from(args)
            .context("invalid command line")?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = Self::default();

        if let Some(color) = matches.get_one::<String>("color") {
            config.initial_color = parse_color(color)?;
        }
        if let Some(&cols) = matches.get_one::<u32>("columns") {
            config.canvas_globs.0 = cols;
        }
        if let Some(&rows) = matches.get_one::<u32>("rows") {
            config.canvas_globs.1 = rows;
        }
        config.log_filter = matches.get_one::<String>("log").cloned();

        Ok(config)
    }
}

fn command() -> Command {
    Command::new("tracer-studio")
        .about("Click to place colored globs on a GPU canvas")
        .arg(
            Arg::new("color")
                .short('c')
                .long("color")
                .value_name("R**G**B**A")
                .help("Initial brush color, four channels in [0, 1] joined by '**'"),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .value_name("GLOBS")
                .help("Canvas width in globs")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_name("GLOBS")
                .help("Canvas height in globs")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("FILTER")
                .help("Log filter, e.g. 'debug' or 'tracer_engine=trace'"),
        )
}

/// Parses `r**g**b**a` (straight alpha, channels in `[0, 1]`).
pub fn parse_color(s: &str) -> Result<ColorRgba> {
    let channels = s
        .split("**")
        .map(|c| c.trim().parse::<f32>().with_context(|| format!("bad color channel '{c}'")))
        .collect::<Result<Vec<_>>>()?;

    let [r, g, b, a] = channels[..] else {
        bail!("color '{s}' must have 4 channels, got {}", channels.len());
    };

    let color = ColorRgba::new(r, g, b, a);
    if !color.is_normalized() {
        bail!("color '{s}' has channels outside [0, 1]");
    }
    Ok(color)
}

/// Render scale for a zoom level: `1, 2, 3, ..` zooming in and
/// `1/2, 1/3, ..` zooming out.
pub fn zoom_scale(level: i32) -> f32 {
    if level < 0 {
        -1.0 / (level - 1) as f32
    } else {
        (level + 1) as f32
    }
}
