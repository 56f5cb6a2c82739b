//! Run configuration and the named color palette.
//!
//! A [`Config`] holds everything one run needs. It is built from CLI flags
//! or, with [`Config::prompt`], from interactive answers, and must pass
//! [`Config::validate`] before it is used.

use crate::error::{Result, VoronoiError};
use crate::sampling::{SamplingDomain, DEFAULT_ATTEMPTS};
use std::fmt;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Accepted output resolutions, in pixels per side.
pub const IMAGE_SIZE_RANGE: RangeInclusive<u32> = 256..=4096;
/// Accepted cell sizes; larger cells mean fewer points.
pub const CELL_SIZE_RANGE: RangeInclusive<u32> = 1..=1000;
/// Accepted line widths, in pixels.
pub const LINE_WIDTH_RANGE: RangeInclusive<u32> = 1..=30;

/// Settings for one sampling and diagram run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Side of the square output images, and of the density map.
    pub image_size: u32,
    /// Controls the point count through [`Config::target_point_count`].
    pub cell_size: u32,
    /// Width of rendered Voronoi edges, in pixels.
    pub line_width: u32,
    pub cell_color: NamedColor,
    pub edge_color: NamedColor,
    pub domain: SamplingDomain,
    /// Fixed RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Candidates tried per active sample.
    pub max_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_size: 512,
            cell_size: 500,
            line_width: 2,
            cell_color: NamedColor::White,
            edge_color: NamedColor::Black,
            domain: SamplingDomain::Square,
            seed: None,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl Config {
    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        check_range(
            "image_size",
            self.image_size,
            &IMAGE_SIZE_RANGE,
            "must be between 256 and 4096",
        )?;
        check_range(
            "cell_size",
            self.cell_size,
            &CELL_SIZE_RANGE,
            "must be between 1 and 1000",
        )?;
        check_range(
            "line_width",
            self.line_width,
            &LINE_WIDTH_RANGE,
            "must be between 1 and 30",
        )?;
        if self.max_attempts == 0 {
            return Err(VoronoiError::invalid_config(
                "max_attempts",
                self.max_attempts,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number of points to aim for: `floor((1001 - cell_size) / 500 *
    /// image_size + 3)`.
    ///
    /// ```
    /// use voronoise::Config;
    ///
    /// let config = Config { image_size: 512, cell_size: 1000, ..Config::default() };
    /// assert_eq!(config.target_point_count(), 4);
    /// ```
    pub fn target_point_count(&self) -> usize {
        let cells = f64::from(1001u32.saturating_sub(self.cell_size));
        (cells / 500.0 * f64::from(self.image_size) + 3.0) as usize
    }

    /// Asks for each setting on `output`, reading answers from `input`.
    ///
    /// Invalid answers are reported and asked again. Fields that are not
    /// asked for keep their value from `self`.
    ///
    /// # Errors
    ///
    /// [`VoronoiError::Io`] if reading or writing fails, including end of
    /// input before every question is answered.
    pub fn prompt<R: BufRead, W: Write>(mut self, input: &mut R, output: &mut W) -> Result<Self> {
        let mut prompter = Prompter { input, output };

        self.image_size = prompter.ask_in_range(
            "Enter desired image resolution (e.g. 512 for a 512x512 image), 256-4096: ",
            "Please enter a valid resolution.",
            &IMAGE_SIZE_RANGE,
        )?;
        self.cell_size = prompter.ask_in_range(
            "Enter cell size, 1-1000: ",
            "Please enter a valid cell size.",
            &CELL_SIZE_RANGE,
        )?;
        self.line_width = prompter.ask_in_range(
            "Enter line width in pixels, 1-30: ",
            "Please enter a valid line width.",
            &LINE_WIDTH_RANGE,
        )?;

        writeln!(prompter.output, "\nChoose a color for the cells.")?;
        self.cell_color = prompter.ask_color()?;
        writeln!(prompter.output, "\nChoose a color for the edges.")?;
        self.edge_color = prompter.ask_color()?;

        Ok(self)
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
    reason: &'static str,
) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(VoronoiError::invalid_config(field, value, reason))
    }
}

struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input ended before all settings were given",
            )
            .into());
        }
        Ok(line.trim().to_string())
    }

    fn ask_in_range(
        &mut self,
        question: &str,
        retry: &str,
        range: &RangeInclusive<u32>,
    ) -> Result<u32> {
        loop {
            write!(self.output, "{question}")?;
            self.output.flush()?;
            match self.read_answer()?.parse::<u32>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                _ => writeln!(self.output, "\n{retry}")?,
            }
        }
    }

    fn ask_color(&mut self) -> Result<NamedColor> {
        loop {
            writeln!(
                self.output,
                "Choose a color from the following list and enter its number or name:"
            )?;
            for color in NamedColor::ALL {
                writeln!(self.output, "{}: {}", color.index(), color.name())?;
            }
            self.output.flush()?;
            match self.read_answer()?.parse::<NamedColor>() {
                Ok(color) => return Ok(color),
                Err(_) => writeln!(self.output, "\nPlease enter a valid color.")?,
            }
        }
    }
}

macro_rules! palette {
    ($($variant:ident => $name:literal, [$r:expr, $g:expr, $b:expr];)*) => {
        /// The fixed palette offered for cell and edge colors.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NamedColor {
            $($variant,)*
        }

        impl NamedColor {
            /// Every color, in menu order.
            pub const ALL: [NamedColor; 41] = [$(NamedColor::$variant,)*];

            /// The menu label.
            pub fn name(self) -> &'static str {
                match self {
                    $(NamedColor::$variant => $name,)*
                }
            }

            /// Red, green and blue in `[0, 1]`.
            pub fn rgb(self) -> [f32; 3] {
                match self {
                    $(NamedColor::$variant => [$r, $g, $b],)*
                }
            }
        }
    };
}

palette! {
    White => "white", [1.0, 1.0, 1.0];
    Black => "black", [0.0, 0.0, 0.0];
    DarkRed => "darkRed", [0.545, 0.0, 0.0];
    Red => "red", [1.0, 0.0, 0.0];
    Pink => "pink", [1.0, 0.753, 0.796];
    DeepPink => "deepPink", [1.0, 0.078, 0.576];
    Coral => "coral", [1.0, 0.498, 0.314];
    Orange => "orange", [1.0, 0.647, 0.0];
    Gold => "gold", [1.0, 0.843, 0.0];
    Yellow => "yellow", [1.0, 1.0, 0.0];
    Lavender => "lavender", [0.902, 0.902, 0.980];
    Violet => "violet", [0.933, 0.510, 0.933];
    BlueViolet => "blueViolet", [0.541, 0.169, 0.886];
    Purple => "purple", [0.502, 0.0, 0.502];
    Indigo => "indigo", [0.294, 0.0, 0.510];
    Lime => "lime", [0.0, 1.0, 0.0];
    SpringGreen => "springGreen", [0.0, 1.0, 0.498];
    SeaGreen => "seaGreen", [0.180, 0.545, 0.341];
    Green => "green", [0.0, 0.502, 0.0];
    DarkGreen => "darkGreen", [0.0, 0.392, 0.0];
    Olive => "olive", [0.502, 0.502, 0.0];
    Teal => "teal", [0.0, 0.502, 0.502];
    Cyan => "cyan", [0.0, 1.0, 1.0];
    Aquamarine => "aquamarine", [0.498, 1.0, 0.831];
    Turquoise => "turquoise", [0.251, 0.878, 0.816];
    SteelBlue => "steelBlue", [0.275, 0.510, 0.706];
    SkyBlue => "skyBlue", [0.529, 0.808, 0.922];
    RoyalBlue => "royalBlue", [0.255, 0.412, 0.882];
    Blue => "blue", [0.0, 0.0, 1.0];
    Navy => "navy", [0.0, 0.0, 0.502];
    Wheat => "wheat", [0.961, 0.871, 0.702];
    Tan => "tan", [0.824, 0.706, 0.549];
    Chocolate => "chocolate", [0.824, 0.412, 0.118];
    Sienna => "sienna", [0.627, 0.322, 0.176];
    Brown => "brown", [0.647, 0.165, 0.165];
    Honeydew => "honeydew", [0.941, 1.0, 0.941];
    Azure => "azure", [0.941, 1.0, 1.0];
    Beige => "beige", [0.961, 0.961, 0.863];
    Silver => "silver", [0.753, 0.753, 0.753];
    Gray => "gray", [0.502, 0.502, 0.502];
    DimGray => "dimgray", [0.412, 0.412, 0.412];
}

impl NamedColor {
    /// Looks a color up by its menu number.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The menu number.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Blue, green, red bytes, the pixel order of 24-bit BMP.
    pub fn bgr8(self) -> [u8; 3] {
        let [r, g, b] = self.rgb();
        let byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [byte(b), byte(g), byte(r)]
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedColor {
    type Err = VoronoiError;

    /// Accepts a menu number or a case-insensitive name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let found = match s.parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => Self::ALL
                .into_iter()
                .find(|color| color.name().eq_ignore_ascii_case(s)),
        };
        found.ok_or_else(|| {
            VoronoiError::invalid_config("color", s, "must be a palette number 0-40 or a color name")
        })
    }
}
