//! Busy indicator shown while suggestions are loading.
//!
//! The indicator animates through a set of frames driven by [`TickMsg`]s. It
//! can be started and stopped; every start or stop bumps an internal tag so
//! ticks scheduled by an earlier run are ignored instead of doubling the
//! animation speed.
//!
//! ```rust
//! use bubbletea_suggest::busy::{Indicator, DOT};
//!
//! let mut busy = Indicator::new().with_frames(DOT.clone());
//! assert!(!busy.running());
//! let _tick = busy.start();
//! assert!(busy.running());
//! busy.stop();
//! assert_eq!(busy.view(), "");
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Animation frames and the delay between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frames {
    /// Frames to cycle through.
    pub frames: Vec<String>,
    /// Delay between frames.
    pub interval: Duration,
}

impl Frames {
    /// Creates a frame set.
    pub fn new(frames: Vec<String>, interval: Duration) -> Self {
        Self { frames, interval }
    }
}

fn frames_of(frames: &[&str], millis: u64) -> Frames {
    Frames::new(
        frames.iter().map(|f| f.to_string()).collect(),
        Duration::from_millis(millis),
    )
}

/// `| / - \`
pub static LINE: Lazy<Frames> = Lazy::new(|| frames_of(&["|", "/", "-", "\\"], 100));

/// Braille dots.
pub static DOT: Lazy<Frames> =
    Lazy::new(|| frames_of(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"], 100));

/// Small braille dots.
pub static MINI_DOT: Lazy<Frames> = Lazy::new(|| {
    frames_of(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"], 83)
});

/// Growing ellipsis.
pub static ELLIPSIS: Lazy<Frames> = Lazy::new(|| frames_of(&["", ".", "..", "..."], 333));

/// Advances the indicator one frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Indicator this tick belongs to.
    pub id: u64,
    tag: u64,
}

/// Busy indicator state.
#[derive(Debug, Clone)]
pub struct Indicator {
    /// Frames to animate.
    pub frames: Frames,
    /// Style applied to the current frame.
    pub style: Style,
    frame: usize,
    id: u64,
    tag: u64,
    running: bool,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator {
    /// Creates a stopped indicator using [`MINI_DOT`].
    pub fn new() -> Self {
        Self {
            frames: MINI_DOT.clone(),
            style: Style::new(),
            frame: 0,
            id: next_id(),
            tag: 0,
            running: false,
        }
    }

    /// Uses `frames` for the animation.
    pub fn with_frames(mut self, frames: Frames) -> Self {
        self.frames = frames;
        self
    }

    /// Uses `style` for rendering.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Identifier used to route ticks.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the animation is running.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Starts (or restarts) the animation from the first frame.
    ///
    /// Starting bumps the internal tag, so ticks left over from an earlier
    /// run are ignored and the animation never speeds up.
    ///
    /// # Returns
    ///
    /// A command delivering the first [`TickMsg`] after one frame interval.
    /// Return it from your `update` to keep the animation going.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_suggest::busy::Indicator;
    ///
    /// let mut busy = Indicator::new();
    /// let _first_tick = busy.start();
    /// assert!(busy.running());
    /// assert_eq!(busy.frame(), "⠋");
    /// ```
    pub fn start(&mut self) -> Cmd {
        self.running = true;
        self.frame = 0;
        self.tag += 1;
        self.tick()
    }

    /// Stops the animation.
    ///
    /// Ticks already scheduled are ignored when they arrive, and
    /// [`Indicator::view`] renders nothing until the next
    /// [`Indicator::start`].
    pub fn stop(&mut self) {
        self.running = false;
        self.tag += 1;
    }

    /// A tick for the current run, mostly useful in tests.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.frames.interval, move |_| {
            Box::new(TickMsg { id, tag }) as Msg
        })
    }

    /// Advances on a matching tick and schedules the next one.
    ///
    /// # Arguments
    ///
    /// * `msg` - Any message; only a [`TickMsg`] for this indicator's id and
    ///   current tag has an effect
    ///
    /// # Returns
    ///
    /// The command for the next tick, or `None` when the message was not a
    /// current tick or the indicator is stopped.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if !self.running || tick.id != self.id || tick.tag != self.tag {
            return None;
        }
        if !self.frames.frames.is_empty() {
            self.frame = (self.frame + 1) % self.frames.frames.len();
        }
        self.tag += 1;
        Some(self.tick())
    }

    /// The current frame without styling, or `""` when stopped.
    ///
    /// Use this when the caller applies its own style; [`Indicator::view`]
    /// renders the same frame with [`Indicator::style`].
    pub fn frame(&self) -> &str {
        if !self.running {
            return "";
        }
        self.frames
            .frames
            .get(self.frame)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Renders the current frame with [`Indicator::style`].
    ///
    /// # Returns
    ///
    /// The styled frame, or an empty string when the indicator is stopped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_suggest::busy::{Indicator, LINE};
    ///
    /// let mut busy = Indicator::new().with_frames(LINE.clone());
    /// assert_eq!(busy.view(), "");
    /// let _tick = busy.start();
    /// assert_eq!(busy.view(), "|");
    /// ```
    pub fn view(&self) -> String {
        let frame = self.frame();
        if frame.is_empty() {
            return String::new();
        }
        self.style.render(frame)
    }

    pub(crate) fn frame_index(&self) -> usize {
        self.frame
    }
}
