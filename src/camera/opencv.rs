use opencv::{core::Mat, highgui, prelude::*, videoio};

use super::viewer::{FrameDisplay, FrameSource};
use super::CameraError;

pub struct OpenCvCapture {
    capture: videoio::VideoCapture,
}

impl OpenCvCapture {
    /// Opens `description` with the GStreamer backend.
    pub fn open(description: &str) -> Result<Self, CameraError> {
        let capture = videoio::VideoCapture::from_file(description, videoio::CAP_GSTREAMER)?;

        if !capture.is_opened()? {
            return Err(CameraError::OpenFailed);
        }

        Ok(Self { capture })
    }
}

impl FrameSource for OpenCvCapture {
    type Frame = Mat;

    fn read_frame(&mut self) -> Result<Option<Mat>, CameraError> {
        let mut frame = Mat::default();

        if self.capture.read(&mut frame)? {
            Ok(Some(frame))
        } else {
            Ok(None)
        }
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.capture.release()?;
        Ok(())
    }
}

pub struct HighGuiWindow {
    name: String,
}

impl HighGuiWindow {
    pub fn new(name: &str, fullscreen: bool) -> Result<Self, CameraError> {
        if fullscreen {
            highgui::named_window(name, highgui::WND_PROP_FULLSCREEN)?;
            highgui::set_window_property(
                name,
                highgui::WND_PROP_FULLSCREEN,
                f64::from(highgui::WINDOW_FULLSCREEN),
            )?;
        } else {
            highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        }

        Ok(Self {
            name: name.to_string(),
        })
    }
}

impl FrameDisplay<Mat> for HighGuiWindow {
    fn show(&mut self, frame: &Mat) -> Result<(), CameraError> {
        highgui::imshow(&self.name, frame)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> Result<i32, CameraError> {
        Ok(highgui::wait_key(delay_ms)?)
    }

    fn close(&mut self) -> Result<(), CameraError> {
        highgui::destroy_all_windows()?;
        Ok(())
    }
}
