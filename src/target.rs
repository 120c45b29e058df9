//! Visual targets: the animatable handles a rendering surface exposes.
//!
//! The surface owns its widgets; the animation engine only gets handles to
//! their animatable properties, published as signals. A [`Surface`] is a
//! per-mount registry: targets are registered under a class name in
//! declaration order and resolved once at sequence-build time. Because each
//! mount gets its own `Surface`, a rebuilt surface can never be addressed
//! through a stale handle from a previous mount.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::ClipPolygon;
use crate::reactive::{create_signal, Signal};

/// Unique identifier for a target within the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TargetId(u64);

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

impl TargetId {
    /// Generate a new unique target ID
    pub fn next() -> Self {
        TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to one addressable region of the rendered surface.
///
/// Identity is structural: two targets registered in the same position on
/// different mounts are different targets. The handle exposes only the
/// animatable properties; layout and content stay with the surface.
#[derive(Clone)]
pub struct Target {
    id: TargetId,
    translate_y: Signal<f32>,
    clip: Signal<ClipPolygon>,
}

impl Target {
    pub fn new() -> Self {
        Self {
            id: TargetId::next(),
            translate_y: create_signal(0.0),
            // Matches the stylesheet baseline: overlays start clipped shut.
            clip: create_signal(ClipPolygon::COLLAPSED),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Vertical offset in layout units; positive is downward.
    pub fn translate_y(&self) -> Signal<f32> {
        self.translate_y.clone()
    }

    /// Clip geometry, in percent of the target's box.
    pub fn clip(&self) -> Signal<ClipPolygon> {
        self.clip.clone()
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-mount target registry, scoped to one rendered root.
#[derive(Clone, Default)]
pub struct Surface {
    entries: Rc<RefCell<Vec<(String, Target)>>>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target under a class name. Declaration order is preserved
    /// and is the order staggered phases run in.
    pub fn register(&self, class: &str, target: &Target) {
        log::trace!("surface register {:?} as .{class}", target.id());
        self.entries
            .borrow_mut()
            .push((class.to_owned(), target.clone()));
    }

    /// Resolve the first target registered under `class`.
    pub fn query(&self, class: &str) -> Option<Target> {
        self.entries
            .borrow()
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, target)| target.clone())
    }

    /// Resolve every target registered under `class`, in declaration order.
    pub fn query_all(&self, class: &str) -> Vec<Target> {
        self.entries
            .borrow()
            .iter()
            .filter(|(name, _)| name == class)
            .map(|(_, target)| target.clone())
            .collect()
    }
}
