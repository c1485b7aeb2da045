//! Frame cursor over a recorded episode.

/// Cursor that walks the frames of an episode trace.
///
/// Advancing wraps to frame 0 when looping is enabled; otherwise the cursor
/// stops at the last frame.
#[derive(Clone, Debug)]
pub struct Playback {
    frame: usize,
    len: usize,
    looping: bool,
    paused: bool,
}

impl Playback {
    /// Create a cursor over `len` frames.
    pub fn new(len: usize, looping: bool) -> Self {
        Self {
            frame: 0,
            len,
            looping,
            paused: false,
        }
    }

    /// Current frame index.
    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether playback is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Whether the cursor sits on the last frame of a non-looping run.
    pub fn at_end(&self) -> bool {
        !self.looping && self.len > 0 && self.frame == self.len - 1
    }

    /// Advance by one frame on the playback clock.
    ///
    /// Returns `false` when paused or already stopped at the end.
    pub fn advance(&mut self) -> bool {
        if self.paused || self.len == 0 {
            return false;
        }
        if self.frame + 1 < self.len {
            self.frame += 1;
            true
        } else if self.looping {
            self.frame = 0;
            true
        } else {
            false
        }
    }

    /// Manually step one frame forward, wrapping. Ignores pause.
    pub fn step_forward(&mut self) {
        if self.len > 0 {
            self.frame = (self.frame + 1) % self.len;
        }
    }

    /// Manually step one frame backward, wrapping. Ignores pause.
    pub fn step_backward(&mut self) {
        if self.len > 0 {
            self.frame = (self.frame + self.len - 1) % self.len;
        }
    }

    /// Rewind to frame 0.
    pub fn rewind(&mut self) {
        self.frame = 0;
    }
}
