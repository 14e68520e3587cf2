//! Element ancestry used to resolve the hovered dropzone
//!
//! The coordinator never touches a real widget tree. Hosts expose the
//! parent chain and the dropzone markers of their elements through
//! [`ElementTree`]; [`ElementArena`] is a ready-made implementation.

use super::ids::DropzoneId;

/// Read-only view of a host's element hierarchy.
pub trait ElementTree {
    /// Element handle.
    type Element: Copy;

    /// Parent of an element, `None` at the root.
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Dropzone marker carried by an element, if any.
    fn dropzone_id(&self, element: Self::Element) -> Option<&DropzoneId>;
}

/// Walks up from `element` to the first element carrying a dropzone marker.
pub fn closest_dropzone_ancestor<T>(tree: &T, element: T::Element) -> Option<T::Element>
where
    T: ElementTree + ?Sized,
{
    let mut current = Some(element);
    while let Some(candidate) = current {
        if tree.dropzone_id(candidate).is_some() {
            return Some(candidate);
        }
        current = tree.parent(candidate);
    }
    None
}

/// Handle of an element stored in an [`ElementArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

#[derive(Debug, Clone)]
struct ElementNode {
    parent: Option<ElementRef>,
    dropzone: Option<DropzoneId>,
}

/// Flat arena of elements with parent links.
#[derive(Debug, Clone, Default)]
pub struct ElementArena {
    nodes: Vec<ElementNode>,
}

impl ElementArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element under `parent`.
    pub fn add(&mut self, parent: Option<ElementRef>) -> ElementRef {
        self.nodes.push(ElementNode {
            parent,
            dropzone: None,
        });
        ElementRef(self.nodes.len() - 1)
    }

    /// Adds an element carrying a dropzone marker under `parent`.
    pub fn add_dropzone(&mut self, parent: Option<ElementRef>, dropzone: DropzoneId) -> ElementRef {
        self.nodes.push(ElementNode {
            parent,
            dropzone: Some(dropzone),
        });
        ElementRef(self.nodes.len() - 1)
    }
}

impl ElementTree for ElementArena {
    type Element = ElementRef;

    fn parent(&self, element: ElementRef) -> Option<ElementRef> {
        self.nodes.get(element.0).and_then(|node| node.parent)
    }

    fn dropzone_id(&self, element: ElementRef) -> Option<&DropzoneId> {
        self.nodes.get(element.0).and_then(|node| node.dropzone.as_ref())
    }
}
