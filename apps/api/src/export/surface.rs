//! Off-screen copies of a rendered tree.
//!
//! Export never works on the live preview: it detaches a copy pinned to the
//! reference width and releases it when the copy is dropped, whether the export
//! succeeded or not.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::render::VisualTree;

/// Tracks the copies currently attached.
#[derive(Debug, Clone, Default)]
pub struct OffscreenSurface {
    live: Arc<AtomicUsize>,
}

impl OffscreenSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an owned copy of `tree` laid out at `width_px`.
    pub fn detach(&self, tree: &VisualTree, width_px: u32) -> DetachedView {
        let attached = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(template = %tree.template, width_px, attached, "Off-screen copy attached");
        DetachedView {
            tree: tree.clone(),
            width_px,
            live: Arc::clone(&self.live),
        }
    }

    /// Number of copies not yet released.
    pub fn attached(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A detached copy; released on drop.
#[derive(Debug)]
pub struct DetachedView {
    pub tree: VisualTree,
    pub width_px: u32,
    live: Arc<AtomicUsize>,
}

impl Drop for DetachedView {
    fn drop(&mut self) {
        let remaining = self.live.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!(remaining, "Off-screen copy released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::render::{render, TemplateId};

    #[test]
    fn test_detach_and_release() {
        let surface = OffscreenSurface::new();
        let tree = render(&Record::default(), TemplateId::Classic);

        let view = surface.detach(&tree, 800);
        assert_eq!(surface.attached(), 1);
        assert_eq!(view.tree, tree);
        assert_eq!(view.width_px, 800);

        let second = surface.detach(&tree, 800);
        assert_eq!(surface.attached(), 2);
        drop(view);
        drop(second);
        assert_eq!(surface.attached(), 0);
    }

    #[test]
    fn test_copy_is_independent_of_source() {
        let surface = OffscreenSurface::new();
        let mut tree = render(&Record::default(), TemplateId::Modern);
        let view = surface.detach(&tree, 800);
        tree.root.children.clear();
        assert!(!view.tree.root.children.is_empty());
    }
}
