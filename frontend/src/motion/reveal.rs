//! One-shot reveal tracking for scroll-animated elements.
//!
//! Elements are registered once, in document order, and each moves from
//! pending to revealed at most once. Two drivers feed the registry:
//! [`RevealRegistry::poll`] re-checks every pending element on a scroll tick,
//! and [`RevealRegistry::intersected`] handles a push notification for a single
//! element. Both end up in [`RevealRegistry::reveal`], the only mutation.

use super::viewport::Viewport;
use super::visibility::RevealPolicy;

/// Visual delay handed to each element so neighbours animate in sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stagger {
    None,
    /// `index * step_ms`
    Linear { step_ms: u32 },
    /// `index % period * step_ms`
    Cycle { period: usize, step_ms: u32 },
}

impl Stagger {
    pub fn delay_for(&self, index: usize) -> u32 {
        match *self {
            Stagger::None => 0,
            Stagger::Linear { step_ms } => (index as u32).saturating_mul(step_ms),
            Stagger::Cycle { period, step_ms } => {
                (index % period.max(1)) as u32 * step_ms
            }
        }
    }
}

#[derive(Debug)]
pub struct TrackedElement<N> {
    node: N,
    revealed: bool,
    delay_ms: u32,
}

/// A pending element that just became revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<N> {
    pub index: usize,
    pub node: N,
    pub delay_ms: u32,
}

#[derive(Debug)]
pub struct RevealRegistry<N> {
    elements: Vec<TrackedElement<N>>,
}

impl<N: Clone> RevealRegistry<N> {
    pub fn new(nodes: impl IntoIterator<Item = N>, stagger: Stagger) -> Self {
        let elements = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| TrackedElement {
                node,
                revealed: false,
                delay_ms: stagger.delay_for(index),
            })
            .collect();
        Self { elements }
    }

    pub fn pending(&self) -> usize {
        self.elements.iter().filter(|e| !e.revealed).count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.elements.iter().map(|e| &e.node)
    }

    /// Marks `index` revealed. Returns `None` when it already was, or when
    /// the index is unknown.
    pub fn reveal(&mut self, index: usize) -> Option<Transition<N>> {
        let element = self.elements.get_mut(index)?;
        if element.revealed {
            return None;
        }
        element.revealed = true;
        Some(Transition {
            index,
            node: element.node.clone(),
            delay_ms: element.delay_ms,
        })
    }

    /// Push driver: an observer reported a crossing for `index`. Only the
    /// first intersecting report counts; the caller stops observing the
    /// element when a transition comes back.
    pub fn intersected(&mut self, index: usize, is_intersecting: bool) -> Option<Transition<N>> {
        if !is_intersecting {
            return None;
        }
        self.reveal(index)
    }

    /// Poll driver: checks every pending element, in document order, against
    /// the live layout. Elements whose geometry can't be read stay pending.
    pub fn poll<V>(&mut self, viewport: &V, policy: RevealPolicy) -> Vec<Transition<N>>
    where
        V: Viewport<Node = N>,
    {
        let viewport_height = viewport.viewport_height();
        let visible: Vec<usize> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.revealed)
            .filter(|(_, e)| {
                viewport
                    .bounding_box(&e.node)
                    .map_or(false, |bbox| policy.is_in_viewport(&bbox, viewport_height))
            })
            .map(|(index, _)| index)
            .collect();

        visible.into_iter().filter_map(|index| self.reveal(index)).collect()
    }
}
