//! Read-only widget-tree traversal.

use std::rc::Rc;

/// One node of the host's widget tree, seen through its focus-relevant
/// capabilities only.
pub trait WidgetNode {
    /// Child widgets in layout order; empty for leaves.
    fn children(&self) -> Vec<Rc<dyn WidgetNode>>;

    /// Whether the widget is able to receive input focus.
    fn can_focus(&self) -> bool;

    /// Whether the widget currently has input focus.
    fn has_focus(&self) -> bool;
}

/// Find the leaf widget that should receive input focus inside `widget`.
///
/// Depth-first: the first focusable descendant wins. Some containers have
/// no children yet can take focus themselves (tree views, for instance),
/// so the widget itself is the answer when nothing deeper matched.
///
/// Purely read-only; the tree is queried fresh on every call and no
/// reference outlives the lookup.
pub fn find_focus_target(widget: &Rc<dyn WidgetNode>) -> Option<Rc<dyn WidgetNode>> {
    let mut focus = None;
    for child in widget.children() {
        focus = find_focus_target(&child);
        if focus.is_some() {
            break;
        }
    }
    if focus.is_none() && widget.can_focus() {
        focus = Some(Rc::clone(widget));
    }
    focus
}
