//! The rendered node a collapse controller animates.
//!
//! The host owns the node. The controller only holds a [`NodeRef`], uses it
//! to measure and to apply styles at phase boundaries, and keeps working
//! (reading zero, skipping styling) once the host has dropped it.

pub mod headless;

pub use headless::{HeadlessNode, StyleChanges};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::animation::TimingSpec;

/// A height value as written to the node's style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeStyle {
    /// Pinned pixel height
    Px(f32),
    /// Natural height of the content, never clipped
    Auto,
}

impl SizeStyle {
    pub fn is_auto(&self) -> bool {
        matches!(self, SizeStyle::Auto)
    }

    /// Pixel value, or `None` for `Auto`.
    pub fn px(&self) -> Option<f32> {
        match self {
            SizeStyle::Px(px) => Some(*px),
            SizeStyle::Auto => None,
        }
    }
}

impl fmt::Display for SizeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeStyle::Px(px) => write!(f, "{}px", px),
            SizeStyle::Auto => write!(f, "auto"),
        }
    }
}

/// A style property a node can transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Height,
    Other(String),
}

/// Native end-of-transition signal reported by the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionEnd {
    pub property: StyleProperty,
}

impl TransitionEnd {
    pub fn new(property: StyleProperty) -> Self {
        Self { property }
    }

    pub fn height() -> Self {
        Self::new(StyleProperty::Height)
    }
}

/// Imperative styling surface of a collapse container.
///
/// Implemented by whatever retained or immediate mode toolkit hosts the
/// container. Only ever called from phase boundaries, never from the
/// describe pass.
pub trait CollapseNode {
    /// Natural height of the content wrapper, or `None` if it cannot be
    /// measured (not mounted yet).
    fn natural_size(&self) -> Option<f32>;

    /// Height the container currently renders at, including any transition
    /// in flight.
    fn rendered_size(&self) -> Option<f32>;

    /// Set the height immediately, dropping any running transition.
    fn set_size(&mut self, size: SizeStyle);

    /// Transition the height to `target` using `timing`.
    fn apply_timing(&mut self, timing: &TimingSpec, target: SizeStyle);
}

/// Non-owning handle to a node shared with the host.
pub struct NodeRef<N> {
    node: Weak<RefCell<N>>,
}

impl<N> NodeRef<N> {
    pub fn new(node: &Rc<RefCell<N>>) -> Self {
        Self {
            node: Rc::downgrade(node),
        }
    }

    /// A handle that never resolves. Useful before the host has mounted
    /// anything.
    pub fn dangling() -> Self {
        Self { node: Weak::new() }
    }

    /// Whether the host still holds the node.
    pub fn is_alive(&self) -> bool {
        self.node.strong_count() > 0
    }

    /// Run `f` with shared access to the node, if it is still alive.
    pub fn with<R>(&self, f: impl FnOnce(&N) -> R) -> Option<R> {
        let node = self.node.upgrade()?;
        let node = node.borrow();
        Some(f(&node))
    }

    /// Run `f` with exclusive access to the node, if it is still alive.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut N) -> R) -> Option<R> {
        let node = self.node.upgrade()?;
        let mut node = node.borrow_mut();
        Some(f(&mut node))
    }
}

impl<N> Clone for NodeRef<N> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<N> From<&Rc<RefCell<N>>> for NodeRef<N> {
    fn from(node: &Rc<RefCell<N>>) -> Self {
        Self::new(node)
    }
}

impl<N> fmt::Debug for NodeRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
