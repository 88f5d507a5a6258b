//! Mechanism for loading and sharing the generator configuration

use crate::Result;
use genky::{numeric::Float, Channel};

use eyre::{ensure, eyre, WrapErr};

use std::{fs, mem, str::FromStr};

/// Largest hadronic invariant mass supported by the generator (GeV)
const W_MAX_SUPPORTED: Float = 4.;

/// Generator configuration
#[derive(Debug)]
pub struct Configuration {
    /// Reaction channel
    pub channel: Channel,

    /// Beam energy (GeV)
    pub e_beam: Float,

    /// Lower bound of the Q² range (GeV²)
    pub q2_min: Float,

    /// Upper bound of the Q² range (GeV²)
    pub q2_max: Float,

    /// Lower bound of the W range (GeV)
    pub w_min: Float,

    /// Upper bound of the W range (GeV)
    pub w_max: Float,

    /// Number of events to be generated
    pub num_events: usize,

    /// Lower bound of the primary vertex z coordinate (cm)
    pub vz_min: Float,

    /// Upper bound of the primary vertex z coordinate (cm)
    pub vz_max: Float,

    /// Seed of the random number generator
    pub seed: u64,

    /// Whether unstable reaction products should be decayed
    pub decay: bool,

    /// Name of the LUND output file
    pub output_file: String,
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and print it out
    pub fn load(file_name: &str) -> Result<Self> {
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Could not read configuration file {}", file_name))?;
        let config = Self::parse(&config_str)?;
        config.print();
        Ok(config)
    }

    /// Decode and check configuration file contents
    pub fn parse(config_str: &str) -> Result<Self> {
        // Configuration items are the first non-whitespace chunk of text on
        // each line, blank lines are ignored.
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // Fetch the next configuration item, tagged with the name of the
        // field which it is supposed to fill for error reporting
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| eyre!("Missing configuration of {}", name))
        };

        // Decode the configuration items into concrete values
        let mut config = Configuration {
            channel: next_item("channel")?.parse::<Channel>()?,
            e_beam: next_item("e_beam")?.parse::<Float>()?,
            q2_min: next_item("q2_min")?.parse::<Float>()?,
            q2_max: next_item("q2_max")?.parse::<Float>()?,
            w_min: next_item("w_min")?.parse::<Float>()?,
            w_max: next_item("w_max")?.parse::<Float>()?,
            num_events: next_item("num_events")?.parse::<usize>()?,
            vz_min: next_item("vz_min")?.parse::<Float>()?,
            vz_max: next_item("vz_max")?.parse::<Float>()?,
            seed: next_item("seed")?.parse::<u64>()?,
            decay: next_item("decay")?.parse_bool()?,
            output_file: next_item("output_file")?.data.to_owned(),
        };

        // A sensible run generates at least one event
        ensure!(config.num_events > 0, "Please generate at least one event");
        ensure!(config.e_beam > 0., "Beam energy must be positive");
        ensure!(
            0. <= config.q2_min && config.q2_min <= config.q2_max,
            "Q² range [{}, {}] is invalid",
            config.q2_min,
            config.q2_max
        );

        // The W range is capped, and must reach above the channel threshold
        if config.w_max > W_MAX_SUPPORTED {
            tracing::warn!(
                w_max = config.w_max,
                "The maximal supported W is {} GeV, clamping the W range",
                W_MAX_SUPPORTED
            );
            config.w_max = W_MAX_SUPPORTED;
        }
        ensure!(
            config.w_min < config.w_max,
            "W range [{}, {}] is invalid",
            config.w_min,
            config.w_max
        );
        let threshold = config.channel.threshold();
        ensure!(
            config.w_max > threshold,
            "W range [{}, {}] is below the {} threshold ({} GeV)",
            config.w_min,
            config.w_max,
            config.channel,
            threshold
        );

        // Vertex bounds may be given in any order
        if config.vz_min > config.vz_max {
            mem::swap(&mut config.vz_min, &mut config.vz_max);
        }

        Ok(config)
    }

    /// Lower bound of the W range which can actually be generated
    pub fn w_min_physical(&self) -> Float {
        self.w_min.max(self.channel.threshold())
    }

    /// Report the configuration
    pub fn print(&self) {
        tracing::info!(
            channel = %self.channel,
            e_beam = self.e_beam,
            q2_min = self.q2_min,
            q2_max = self.q2_max,
            w_min = self.w_min,
            w_max = self.w_max,
            num_events = self.num_events,
            vz_min = self.vz_min,
            vz_max = self.vz_max,
            seed = self.seed,
            decay = self.decay,
            output_file = %self.output_file,
            "Generator configuration"
        );
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }

    /// Parse this data using special logic which handles Fortran's bool syntax
    fn parse_bool(self) -> Result<bool> {
        match self.data.to_lowercase().as_str() {
            ".true." => Ok(true),
            ".false." => Ok(false),
            _ => self.parse::<bool>(),
        }
    }
}
