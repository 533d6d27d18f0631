use crate::node::{SizeStyle, StyleProperty};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Declarative style of the collapse container for the current phase.
///
/// This is what a render pass reads. Heights and timing written during a
/// transition go through [`CollapseNode`](crate::node::CollapseNode) instead
/// and take precedence over `height` here.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerStyle {
    /// Base height: collapsed, or natural once entered
    pub height: SizeStyle,
    pub min_height: f32,
    /// Clipped while animating, visible once entered so children with
    /// negative margins can bleed out
    pub overflow: Overflow,
    pub visibility: Visibility,
    /// The only property whose transition end completes a phase
    pub transition_property: StyleProperty,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            height: SizeStyle::Px(0.0),
            min_height: 0.0,
            overflow: Overflow::Hidden,
            visibility: Visibility::Visible,
            transition_property: StyleProperty::Height,
        }
    }
}
