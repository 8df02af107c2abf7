use crate::error::{Error, Result};
use std::env;

/// Runtime knobs for the screening core. Constructed explicitly and handed to
/// `ScreeningCore::new`; there is no global instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Window a freshly initiated test stays open, unless the caller
    /// overrides it per test.
    pub default_test_duration_minutes: i64,
    /// Length of the plaintext submit key handed out at initiation.
    pub submit_key_length: usize,
    pub render: RenderConfig,
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub font_size: f32,
    /// Hard cap on the report image width in pixels.
    pub max_width: u32,
    /// Lines longer than this many characters wrap at whitespace.
    pub optimum_line_chars: usize,
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_test_duration_minutes: 60,
            submit_key_length: 32,
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            max_width: 1200,
            optimum_line_chars: 60,
            jpeg_quality: 90,
        }
    }
}

impl Config {
    /// Reads overrides from the environment, falling back to the defaults
    /// above for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        Ok(Self {
            default_test_duration_minutes: get_env_parse(
                "TEST_DURATION_MINUTES",
                defaults.default_test_duration_minutes,
            )?,
            submit_key_length: get_env_parse("SUBMIT_KEY_LENGTH", defaults.submit_key_length)?,
            render: RenderConfig {
                font_size: get_env_parse("RENDER_FONT_SIZE", defaults.render.font_size)?,
                max_width: get_env_parse("RENDER_MAX_WIDTH", defaults.render.max_width)?,
                optimum_line_chars: get_env_parse(
                    "RENDER_OPTIMUM_LINE_CHARS",
                    defaults.render.optimum_line_chars,
                )?,
                jpeg_quality: get_env_parse("RENDER_JPEG_QUALITY", defaults.render.jpeg_quality)?,
            },
        })
    }
}

fn get_env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
