use super::CameraError;

pub const ESCAPE_KEY: i32 = 27;

pub trait FrameSource {
    type Frame;

    /// `Ok(None)` means the source could not deliver a frame.
    fn read_frame(&mut self) -> Result<Option<Self::Frame>, CameraError>;

    fn release(&mut self) -> Result<(), CameraError>;
}

pub trait FrameDisplay<F> {
    fn show(&mut self, frame: &F) -> Result<(), CameraError>;

    /// Waits up to `delay_ms` for a key press. Negative when no key was pressed.
    fn wait_key(&mut self, delay_ms: i32) -> Result<i32, CameraError>;

    fn close(&mut self) -> Result<(), CameraError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerExit {
    EscapePressed,
    ReadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerStats {
    pub frames_shown: u64,
    pub exit: ViewerExit,
}

fn is_escape(keycode: i32) -> bool {
    keycode & 0xff == ESCAPE_KEY
}

fn show_frames<S, D>(
    source: &mut S,
    display: &mut D,
    key_delay_ms: i32,
    frames_shown: &mut u64,
) -> Result<ViewerExit, CameraError>
where
    S: FrameSource,
    D: FrameDisplay<S::Frame>,
{
    loop {
        let Some(frame) = source.read_frame()? else {
            log::error!("Capture read error");
            return Ok(ViewerExit::ReadFailed);
        };

        display.show(&frame)?;
        *frames_shown += 1;

        if is_escape(display.wait_key(key_delay_ms)?) {
            return Ok(ViewerExit::EscapePressed);
        }
    }
}

/// Shows frames until ESC or a failed read. The source is released and the
/// display closed on every exit path; the first error wins.
pub fn run_viewer<S, D>(
    source: &mut S,
    display: &mut D,
    key_delay_ms: i32,
) -> Result<ViewerStats, CameraError>
where
    S: FrameSource,
    D: FrameDisplay<S::Frame>,
{
    let mut frames_shown = 0;
    let exit = show_frames(source, display, key_delay_ms, &mut frames_shown);

    log::debug!("Releasing capture after {frames_shown} frames...");
    let released = source.release();
    let closed = display.close();

    let exit = exit?;
    released?;
    closed?;

    Ok(ViewerStats { frames_shown, exit })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct FakeSource {
        frames: VecDeque<u32>,
        released: bool,
        fail_release: bool,
    }

    impl FakeSource {
        fn new(frames: impl IntoIterator<Item = u32>) -> Self {
            Self {
                frames: frames.into_iter().collect(),
                released: false,
                fail_release: false,
            }
        }
    }

    impl FrameSource for FakeSource {
        type Frame = u32;

        fn read_frame(&mut self) -> Result<Option<u32>, CameraError> {
            Ok(self.frames.pop_front())
        }

        fn release(&mut self) -> Result<(), CameraError> {
            self.released = true;
            if self.fail_release {
                return Err(CameraError::OpenFailed);
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeDisplay {
        keys: VecDeque<i32>,
        shown: Vec<u32>,
        delays: Vec<i32>,
        closed: bool,
        fail_show: bool,
    }

    impl FrameDisplay<u32> for FakeDisplay {
        fn show(&mut self, frame: &u32) -> Result<(), CameraError> {
            if self.fail_show {
                return Err(CameraError::OpenFailed);
            }
            self.shown.push(*frame);
            Ok(())
        }

        fn wait_key(&mut self, delay_ms: i32) -> Result<i32, CameraError> {
            self.delays.push(delay_ms);
            Ok(self.keys.pop_front().unwrap_or(-1))
        }

        fn close(&mut self) -> Result<(), CameraError> {
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut source = FakeSource::new(0..10);
        let mut display = FakeDisplay {
            keys: VecDeque::from([-1, 'q' as i32, ESCAPE_KEY]),
            ..Default::default()
        };

        let stats = run_viewer(&mut source, &mut display, 30).unwrap();

        assert_eq!(
            stats,
            ViewerStats {
                frames_shown: 3,
                exit: ViewerExit::EscapePressed
            }
        );
        assert_eq!(display.shown, vec![0, 1, 2]);
        assert_eq!(display.delays, vec![30, 30, 30]);
        assert!(source.released);
        assert!(display.closed);
    }

    #[test]
    fn read_failure_stops_the_loop() {
        let mut source = FakeSource::new([7, 8]);
        let mut display = FakeDisplay::default();

        let stats = run_viewer(&mut source, &mut display, 30).unwrap();

        assert_eq!(stats.frames_shown, 2);
        assert_eq!(stats.exit, ViewerExit::ReadFailed);
        assert!(source.released);
        assert!(display.closed);
    }

    #[test]
    fn no_frames_at_all() {
        let mut source = FakeSource::new([0u32; 0]);
        let mut display = FakeDisplay::default();

        let stats = run_viewer(&mut source, &mut display, 30).unwrap();

        assert_eq!(stats.frames_shown, 0);
        assert_eq!(stats.exit, ViewerExit::ReadFailed);
        assert!(display.shown.is_empty());
    }

    #[test]
    fn display_error_still_cleans_up() {
        let mut source = FakeSource::new([1, 2]);
        let mut display = FakeDisplay {
            fail_show: true,
            ..Default::default()
        };

        let result = run_viewer(&mut source, &mut display, 30);

        assert!(matches!(result, Err(CameraError::OpenFailed)));
        assert!(source.released);
        assert!(display.closed);
    }

    #[test]
    fn release_error_still_closes_display() {
        let mut source = FakeSource::new([1]);
        source.fail_release = true;
        let mut display = FakeDisplay {
            keys: VecDeque::from([ESCAPE_KEY]),
            ..Default::default()
        };

        let result = run_viewer(&mut source, &mut display, 30);

        assert!(matches!(result, Err(CameraError::OpenFailed)));
        assert!(display.closed);
    }

    #[test]
    fn keycodes_are_masked_to_the_low_byte() {
        assert!(is_escape(ESCAPE_KEY));
        assert!(is_escape(0x10_0000 | ESCAPE_KEY));
        assert!(!is_escape(-1));
        assert!(!is_escape('x' as i32));
    }
}
