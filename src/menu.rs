//! The navigation menu: declared entries, a toggle-driven open state, and
//! the overlay sequence that animates between the two.
//!
//! State flow is one-way: clicks flip the `open` signal, a single effect
//! observes it and commands the prebuilt timeline (`play` when opening,
//! `reverse` when closing). Nothing else touches the timeline's play
//! position, and the timeline is never rebuilt to reflect state.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{TimingFunction, Transition};
use crate::error::{MenuError, MenuResult};
use crate::geometry::ClipPolygon;
use crate::reactive::{create_effect, create_signal, Effect, Signal};
use crate::target::Surface;
use crate::timeline::{Timeline, TimelineBuilder};

/// Class the surface registers the overlay panel under.
pub const OVERLAY_CLASS: &str = "menu__overlay";
/// Class the surface registers each link-item holder under.
pub const LINK_HOLDER_CLASS: &str = "menu__link__item__holder";

/// One declared navigation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub path: String,
    pub label: String,
}

impl NavEntry {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// The stock entry set, in render order.
pub fn default_entries() -> Vec<NavEntry> {
    vec![
        NavEntry::new("/", "Home"),
        NavEntry::new("/about", "About"),
        NavEntry::new("/work", "Work"),
        NavEntry::new("/craft", "Craft"),
        NavEntry::new("/contact", "Contact"),
    ]
}

/// Routing collaborator: receives navigation requests on link activation.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// The sequence's timing contract, in seconds and layout units.
///
/// These constants define the look of the open/close motion and are part of
/// the component's contract; tune them together or not at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuTiming {
    /// Overlay wipe duration
    pub reveal_duration: f32,
    /// Per-item entrance duration
    pub entrance_duration: f32,
    /// Delay between successive item starts
    pub stagger: f32,
    /// How early the entrance starts before the wipe finishes
    pub entrance_overlap: f32,
    /// Baseline vertical offset items are pinned to while hidden
    pub hidden_offset: f32,
}

impl Default for MenuTiming {
    fn default() -> Self {
        Self {
            reveal_duration: 1.25,
            entrance_duration: 1.0,
            stagger: 0.1,
            entrance_overlap: 0.75,
            hidden_offset: 100.0,
        }
    }
}

/// The menu component: entries, open state, and the sequence handle.
pub struct Menu {
    entries: Vec<NavEntry>,
    timing: MenuTiming,
    open: Signal<bool>,
    // Single writer (mount), single reader set (the sync effect). Holding
    // the timeline out-of-band keeps it stable across surface repaints.
    timeline: Rc<RefCell<Option<Timeline>>>,
    _sync: Effect,
}

impl Menu {
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self::with_timing(entries, MenuTiming::default())
    }

    pub fn with_timing(entries: Vec<NavEntry>, timing: MenuTiming) -> Self {
        let open = create_signal(false);
        let timeline: Rc<RefCell<Option<Timeline>>> = Rc::new(RefCell::new(None));

        // The one reactive rule allowed to command the timeline.
        let sync = {
            let open = open.clone();
            let timeline = timeline.clone();
            create_effect(move || {
                let is_open = open.get();
                match timeline.borrow().as_ref() {
                    Some(timeline) => {
                        if is_open {
                            timeline.play();
                        } else {
                            timeline.reverse();
                        }
                    }
                    None => log::debug!("menu sequence not mounted, state sync deferred"),
                }
            })
        };

        Self {
            entries,
            timing,
            open,
            timeline,
            _sync: sync,
        }
    }

    /// Build the overlay sequence against a mounted surface. Must be called
    /// exactly once per mount, after the surface has registered its targets.
    pub fn mount(&self, surface: &Surface) -> MenuResult<()> {
        if self.timeline.borrow().is_some() {
            return Err(MenuError::AlreadyMounted);
        }
        let overlay = surface.query(OVERLAY_CLASS).ok_or(MenuError::OverlayMissing)?;
        let holders = surface.query_all(LINK_HOLDER_CLASS);
        if holders.len() != self.entries.len() {
            log::warn!(
                "surface registered {} link holders for {} declared entries",
                holders.len(),
                self.entries.len()
            );
        }

        let timing = self.timing;
        let mut builder = TimelineBuilder::new();
        // One-time baseline: pin every holder below its resting position.
        for holder in &holders {
            builder = builder.set(&holder.translate_y(), timing.hidden_offset);
        }
        let holder_offsets: Vec<Signal<f32>> =
            holders.iter().map(|holder| holder.translate_y()).collect();

        let timeline = builder
            .to(
                &overlay.clip(),
                ClipPolygon::FULL_BLEED,
                Transition::new(timing.reveal_duration, TimingFunction::Power4InOut),
            )
            .to_staggered(
                &holder_offsets,
                0.0,
                Transition::new(timing.entrance_duration, TimingFunction::Power4InOut)
                    .offset(-timing.entrance_overlap),
                timing.stagger,
            )
            .build();

        // A toggle that landed before mount was deferred; honor it now.
        if self.open.get_untracked() {
            log::debug!("menu opened before mount, starting deferred play");
            timeline.play();
        }
        *self.timeline.borrow_mut() = Some(timeline);
        Ok(())
    }

    /// Flip the open state and return the new value. The sequence follows
    /// through the sync effect, not from here.
    pub fn toggle(&self) -> bool {
        let next = !self.open.get_untracked();
        self.open.set(next);
        next
    }

    /// Activate the link at `index`: request navigation to its path, then
    /// close the menu. Out-of-range indices are a logged no-op.
    pub fn activate(&self, index: usize, navigator: &mut dyn Navigator) {
        match self.entries.get(index) {
            Some(entry) => {
                log::debug!("navigate to {} via {:?}", entry.path, entry.label);
                navigator.navigate(&entry.path);
                self.toggle();
            }
            None => log::warn!("activated link index {index} out of range"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get_untracked()
    }

    /// The open flag as a signal, for surfaces that render from it.
    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    /// Declared entries, in render (and stagger) order.
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Current sequence progress; 0.0 before mount.
    pub fn progress(&self) -> f32 {
        self.timeline
            .borrow()
            .as_ref()
            .map(|timeline| timeline.progress())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries_in_declared_order() {
        let entries = default_entries();
        let labels: Vec<_> = entries.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, ["Home", "About", "Work", "Craft", "Contact"]);
        assert_eq!(entries[1].path, "/about");
    }

    #[test]
    fn test_timing_contract() {
        let timing = MenuTiming::default();
        assert_eq!(timing.reveal_duration, 1.25);
        assert_eq!(timing.entrance_duration, 1.0);
        assert_eq!(timing.stagger, 0.1);
        assert_eq!(timing.entrance_overlap, 0.75);
        assert_eq!(timing.hidden_offset, 100.0);
    }

    #[test]
    fn test_toggle_flips_and_returns_new_value() {
        let menu = Menu::new(default_entries());
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
        assert!(!menu.is_open());
    }

    #[test]
    fn test_toggle_before_mount_is_absorbed() {
        let menu = Menu::new(default_entries());
        // No surface, no timeline; must not panic and must keep state.
        assert!(menu.toggle());
        assert_eq!(menu.progress(), 0.0);
    }

    #[test]
    fn test_mount_requires_overlay() {
        let menu = Menu::new(default_entries());
        let surface = Surface::new();
        assert_eq!(menu.mount(&surface), Err(MenuError::OverlayMissing));
    }

    #[test]
    fn test_mount_twice_is_rejected() {
        let menu = Menu::new(default_entries());
        let surface = Surface::new();
        surface.register(OVERLAY_CLASS, &crate::target::Target::new());
        assert!(menu.mount(&surface).is_ok());
        assert_eq!(menu.mount(&surface), Err(MenuError::AlreadyMounted));
    }

    #[test]
    fn test_activate_out_of_range_is_noop() {
        struct Panicking;
        impl Navigator for Panicking {
            fn navigate(&mut self, _path: &str) {
                panic!("should not navigate");
            }
        }
        let menu = Menu::new(default_entries());
        menu.activate(99, &mut Panicking);
        assert!(!menu.is_open());
    }
}
