use std::fmt::Display;

use thiserror::Error;

/// Orientation applied by `nvvidconv`, numbered as its `flip-method` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum FlipMethod {
    #[default]
    None = 0,
    CounterClockwise = 1,
    Rotate180 = 2,
    Clockwise = 3,
    HorizontalFlip = 4,
    UpperRightDiagonal = 5,
    VerticalFlip = 6,
    UpperLeftDiagonal = 7,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("flip method must be between 0 and 7, got {0}")]
pub struct FlipMethodError(pub u32);

impl TryFrom<u32> for FlipMethod {
    type Error = FlipMethodError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let method = match value {
            0 => FlipMethod::None,
            1 => FlipMethod::CounterClockwise,
            2 => FlipMethod::Rotate180,
            3 => FlipMethod::Clockwise,
            4 => FlipMethod::HorizontalFlip,
            5 => FlipMethod::UpperRightDiagonal,
            6 => FlipMethod::VerticalFlip,
            7 => FlipMethod::UpperLeftDiagonal,
            _ => return Err(FlipMethodError(value)),
        };

        Ok(method)
    }
}

impl Display for FlipMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub capture_width: u32,
    pub capture_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub framerate: u32,
    pub flip_method: FlipMethod,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        // The sensor driver treats 60 and 120 fps alike for gain and exposure,
        // and 120 fps freezes it after a while.
        Self {
            capture_width: 1280,
            capture_height: 720,
            display_width: 1280,
            display_height: 720,
            framerate: 60,
            flip_method: FlipMethod::None,
        }
    }
}

impl CaptureSettings {
    /// GStreamer launch description: sensor (NV12 in NVMM memory), hardware
    /// conversion and flip to BGRx, then software conversion to BGR for appsink.
    pub fn pipeline_description(&self) -> String {
        format!(
            "nvarguscamerasrc ! video/x-raw(memory:NVMM), width=(int){}, height=(int){}, \
             format=(string)NV12, framerate=(fraction){}/1 ! nvvidconv flip-method={} ! \
             video/x-raw, width=(int){}, height=(int){}, format=(string)BGRx ! videoconvert ! \
             video/x-raw, format=(string)BGR ! appsink",
            self.capture_width,
            self.capture_height,
            self.framerate,
            self.flip_method,
            self.display_width,
            self.display_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline() {
        assert_eq!(
            CaptureSettings::default().pipeline_description(),
            "nvarguscamerasrc ! video/x-raw(memory:NVMM), width=(int)1280, height=(int)720, \
             format=(string)NV12, framerate=(fraction)60/1 ! nvvidconv flip-method=0 ! \
             video/x-raw, width=(int)1280, height=(int)720, format=(string)BGRx ! videoconvert ! \
             video/x-raw, format=(string)BGR ! appsink"
        );
    }

    #[test]
    fn capture_and_display_sizes_are_independent() {
        let settings = CaptureSettings {
            capture_width: 3264,
            capture_height: 2464,
            display_width: 820,
            display_height: 616,
            framerate: 21,
            flip_method: FlipMethod::Rotate180,
        };

        let description = settings.pipeline_description();
        assert!(description.contains(
            "video/x-raw(memory:NVMM), width=(int)3264, height=(int)2464, \
             format=(string)NV12, framerate=(fraction)21/1"
        ));
        assert!(description.contains("nvvidconv flip-method=2 !"));
        assert!(description
            .contains("video/x-raw, width=(int)820, height=(int)616, format=(string)BGRx"));
    }

    #[test]
    fn flip_method_range() {
        assert_eq!(FlipMethod::try_from(0), Ok(FlipMethod::None));
        assert_eq!(FlipMethod::try_from(3), Ok(FlipMethod::Clockwise));
        assert_eq!(FlipMethod::try_from(7), Ok(FlipMethod::UpperLeftDiagonal));
        assert_eq!(FlipMethod::try_from(8), Err(FlipMethodError(8)));
    }

    #[test]
    fn flip_method_displays_as_number() {
        assert_eq!(FlipMethod::VerticalFlip.to_string(), "6");
    }
}
