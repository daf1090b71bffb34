use std::str::FromStr;

use thiserror::Error;

use crate::camera::{CaptureSettings, FlipMethod, FlipMethodError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
    #[error("{0} must be non-zero")]
    Zero(&'static str),
    #[error(transparent)]
    FlipMethod(#[from] FlipMethodError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vulkan".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConfig {
    pub application_name: String,
    pub application_version: u32,
    pub engine_name: String,
    pub engine_version: u32,
    pub api_version: u32,
    /// Defaults to on in debug builds only.
    pub validation: bool,
    pub validation_layers: Vec<String>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            application_name: "Hello Triangle".to_string(),
            application_version: ash::vk::make_api_version(0, 1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: ash::vk::make_api_version(0, 1, 0, 0),
            api_version: ash::vk::API_VERSION_1_0,
            validation: cfg!(debug_assertions),
            validation_layers: vec!["VK_LAYER_KHRONOS_validation".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub instance: InstanceConfig,
}

impl AppConfig {
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--validation" => config.instance.validation = true,
                "--no-validation" => config.instance.validation = false,
                "--resizable" => config.window.resizable = true,
                "--width" => config.window.width = non_zero(&arg, "width", &mut args)?,
                "--height" => config.window.height = non_zero(&arg, "height", &mut args)?,
                "--title" => config.window.title = next_value(&arg, &mut args)?,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConfig {
    pub capture: CaptureSettings,
    pub window_name: String,
    pub fullscreen: bool,
    pub key_delay_ms: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            capture: CaptureSettings::default(),
            window_name: "CSI Camera".to_string(),
            fullscreen: true,
            key_delay_ms: 30,
        }
    }
}

impl CameraConfig {
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--capture" => {
                    let (width, height) = dimensions(&arg, &mut args)?;
                    config.capture.capture_width = width;
                    config.capture.capture_height = height;
                }
                "--display" => {
                    let (width, height) = dimensions(&arg, &mut args)?;
                    config.capture.display_width = width;
                    config.capture.display_height = height;
                }
                "--framerate" => config.capture.framerate = next_value(&arg, &mut args)?,
                "--flip" => {
                    let method: u32 = next_value(&arg, &mut args)?;
                    config.capture.flip_method = FlipMethod::try_from(method)?;
                }
                "--windowed" => config.fullscreen = false,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capture = &self.capture;
        let checks = [
            (capture.capture_width, "capture width"),
            (capture.capture_height, "capture height"),
            (capture.display_width, "display width"),
            (capture.display_height, "display height"),
            (capture.framerate, "framerate"),
        ];

        match checks.iter().find(|(value, _)| *value == 0) {
            Some((_, name)) => Err(ConfigError::Zero(*name)),
            None => Ok(()),
        }
    }
}

fn next_value<T, I>(flag: &str, args: &mut I) -> Result<T, ConfigError>
where
    T: FromStr,
    I: Iterator<Item = String>,
{
    let value = args
        .next()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;

    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

fn non_zero<I>(flag: &str, name: &'static str, args: &mut I) -> Result<u32, ConfigError>
where
    I: Iterator<Item = String>,
{
    let value: u32 = next_value(flag, args)?;
    if value == 0 {
        return Err(ConfigError::Zero(name));
    }

    Ok(value)
}

/// Parses `WIDTHxHEIGHT`.
fn dimensions<I>(flag: &str, args: &mut I) -> Result<(u32, u32), ConfigError>
where
    I: Iterator<Item = String>,
{
    let value: String = next_value(flag, args)?;
    let invalid = || ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.clone(),
    };

    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = width.parse().map_err(|_| invalid())?;
    let height: u32 = height.parse().map_err(|_| invalid())?;

    Ok((width, height))
}
