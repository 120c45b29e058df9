//! `veil`: a reveal/hide navigation overlay engine.
//!
//! A full-screen menu opens with a clip-path wipe followed by a staggered
//! entrance of its link items, and closes by running the exact same sequence
//! backwards. The crate owns the hard part of that interaction: a paused,
//! scrubbable, reversible [`timeline::Timeline`] kept in sync with a single
//! reactive `open` flag, correct even when the user toggles mid-animation.
//!
//! The rendering surface stays outside: it registers addressable
//! [`target::Target`]s on a per-mount [`target::Surface`], repaints from the
//! signals the engine writes, and drives the clock by calling
//! [`frame::tick`] from its render loop. Routing is likewise a collaborator
//! behind the [`menu::Navigator`] trait.
//!
//! ```ignore
//! let menu = Menu::new(default_entries());
//! let surface = Surface::new();
//! let overlay = Target::new();
//! surface.register(OVERLAY_CLASS, &overlay);
//! for _ in menu.entries() {
//!     surface.register(LINK_HOLDER_CLASS, &Target::new());
//! }
//! menu.mount(&surface)?;
//!
//! menu.toggle(); // open; the sequence plays on subsequent frame::tick calls
//! ```

pub mod animation;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod menu;
pub mod reactive;
pub mod target;
pub mod timeline;

pub mod prelude {
    pub use crate::animation::{Animatable, TimingFunction, Transition};
    pub use crate::error::{MenuError, MenuResult};
    pub use crate::frame;
    pub use crate::geometry::{ClipPolygon, Vec2};
    pub use crate::menu::{
        default_entries, Menu, MenuTiming, NavEntry, Navigator, LINK_HOLDER_CLASS, OVERLAY_CLASS,
    };
    pub use crate::reactive::{create_effect, create_signal, Effect, Signal};
    pub use crate::target::{Surface, Target, TargetId};
    pub use crate::timeline::{Timeline, TimelineBuilder};
}
