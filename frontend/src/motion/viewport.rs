/// Vertical geometry of an element relative to the top of the viewport,
/// the same numbers `getBoundingClientRect` reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            height,
        }
    }
}

/// Live reads against whatever is rendering the page.
///
/// Nothing is cached: every call reflects the layout at the moment of the
/// call. `bounding_box` returns `None` when the node is gone, and callers
/// treat that as "not visible".
pub trait Viewport {
    type Node;

    fn scroll_offset(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn bounding_box(&self, node: &Self::Node) -> Option<BoundingBox>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Viewport with hand-placed boxes, keyed by a plain node id.
    #[derive(Default)]
    pub struct ScriptedViewport {
        pub scroll: f64,
        pub height: f64,
        pub boxes: HashMap<u32, BoundingBox>,
    }

    impl ScriptedViewport {
        pub fn with_height(height: f64) -> Self {
            Self {
                height,
                ..Self::default()
            }
        }

        pub fn place(&mut self, node: u32, top: f64, height: f64) {
            self.boxes.insert(node, BoundingBox::new(top, height));
        }

        /// Moves every box as if the page scrolled by `delta` pixels.
        pub fn scroll_by(&mut self, delta: f64) {
            self.scroll += delta;
            for bbox in self.boxes.values_mut() {
                *bbox = BoundingBox::new(bbox.top - delta, bbox.height);
            }
        }
    }

    impl Viewport for ScriptedViewport {
        type Node = u32;

        fn scroll_offset(&self) -> f64 {
            self.scroll
        }

        fn viewport_height(&self) -> f64 {
            self.height
        }

        fn bounding_box(&self, node: &u32) -> Option<BoundingBox> {
            self.boxes.get(node).copied()
        }
    }
}
