//! Link activation handling
//!
//! A click reaches the shell as a [`LinkActivation`] on some node. The shell
//! walks up to the nearest anchor, classifies its destination and either
//! takes over the navigation or lets the browser proceed.

use url::Url;

use crate::intent::{IntentSource, NavigationIntent};
use crate::scope::{LinkClass, PathScope};

/// Read-only view of an element tree, enough to walk from a node to its anchors
pub trait NodeTree {
    type NodeId: Copy;

    fn tag_name(&self, node: Self::NodeId) -> &str;

    fn attribute(&self, node: Self::NodeId, name: &str) -> Option<&str>;

    fn parent(&self, node: Self::NodeId) -> Option<Self::NodeId>;
}

/// Resolved destination of an anchor element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: Url,
}

/// Find the closest anchor at or above `node` whose `href` resolves against `base`.
pub fn nearest_link_ancestor<T: NodeTree>(
    tree: &T,
    node: T::NodeId,
    base: &Url,
) -> Option<LinkTarget> {
    let mut current = Some(node);
    while let Some(id) = current {
        if tree.tag_name(id).eq_ignore_ascii_case("a") {
            if let Some(url) = tree.attribute(id, "href").and_then(|href| base.join(href).ok()) {
                return Some(LinkTarget { url });
            }
        }
        current = tree.parent(id);
    }
    None
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A bubbling click as observed at the document root
#[derive(Debug, Clone, Copy)]
pub struct LinkActivation<N> {
    pub target: N,
    /// Mouse button, 0 for the primary button
    pub button: i16,
    pub modifiers: Modifiers,
    pub default_prevented: bool,
}

impl<N> LinkActivation<N> {
    pub fn primary(target: N) -> Self {
        Self {
            target,
            button: 0,
            modifiers: Modifiers::default(),
            default_prevented: false,
        }
    }

    pub fn is_plain_primary(&self) -> bool {
        self.button == 0 && !self.modifiers.any()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    DefaultPrevented,
    NotPrimaryButton,
    NoLink,
    External,
}

/// What the shell should do with a link activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Let the browser handle the event
    Ignored(IgnoreReason),
    /// Internal link to the current location; nothing to do
    Unchanged(String),
    /// Suppress the default action and navigate
    Navigate(NavigationIntent),
}

impl ActivationOutcome {
    /// Whether the event's default action must be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, ActivationOutcome::Navigate(_))
    }
}

/// Decide the outcome of `event` for a shell currently at `current`.
pub fn evaluate_activation<T: NodeTree>(
    scope: &PathScope,
    page: &Url,
    tree: &T,
    event: &LinkActivation<T::NodeId>,
    current: &str,
) -> ActivationOutcome {
    if event.default_prevented {
        return ActivationOutcome::Ignored(IgnoreReason::DefaultPrevented);
    }
    if !event.is_plain_primary() {
        return ActivationOutcome::Ignored(IgnoreReason::NotPrimaryButton);
    }

    let Some(link) = nearest_link_ancestor(tree, event.target, page) else {
        return ActivationOutcome::Ignored(IgnoreReason::NoLink);
    };

    match scope.classify(page, &link.url) {
        LinkClass::External => ActivationOutcome::Ignored(IgnoreReason::External),
        LinkClass::Internal(path) if path == current => ActivationOutcome::Unchanged(path),
        LinkClass::Internal(path) => {
            ActivationOutcome::Navigate(NavigationIntent::new(path, IntentSource::Link))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<ElementId>,
}

/// Small arena-backed element tree, used where no live DOM is available
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<ElementData>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, tag: &str) -> ElementId {
        self.push(tag, &[], None)
    }

    pub fn append(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        self.push(tag, attributes, Some(parent))
    }

    fn push(
        &mut self,
        tag: &str,
        attributes: &[(&str, &str)],
        parent: Option<ElementId>,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(ElementData {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent,
        });
        id
    }
}

impl NodeTree for ElementTree {
    type NodeId = ElementId;

    fn tag_name(&self, node: ElementId) -> &str {
        &self.elements[node.0].tag
    }

    fn attribute(&self, node: ElementId, name: &str) -> Option<&str> {
        self.elements[node.0]
            .attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn parent(&self, node: ElementId) -> Option<ElementId> {
        self.elements[node.0].parent
    }
}
