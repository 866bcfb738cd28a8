use super::viewport::BoundingBox;

/// How eagerly an element counts as revealed. The observer-driven page and
/// the polling pages use different rules on purpose, so both stay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealPolicy {
    /// Revealed once the top edge is above `height * (1 - fraction)`.
    Threshold { fraction: f64 },
    /// Revealed once the top edge is more than `px` above the bottom edge.
    Margin { px: f64 },
}

impl Default for RevealPolicy {
    fn default() -> Self {
        RevealPolicy::Threshold { fraction: 0.15 }
    }
}

impl RevealPolicy {
    pub fn is_in_viewport(&self, bbox: &BoundingBox, viewport_height: f64) -> bool {
        // Collapsed elements never reveal and stay pending for the session.
        if bbox.height <= 0.0 {
            return false;
        }

        match *self {
            RevealPolicy::Threshold { fraction } => {
                bbox.top < viewport_height * (1.0 - fraction)
            }
            RevealPolicy::Margin { px } => bbox.top < viewport_height - px,
        }
    }
}

/// Any part of the element is on screen. Used to kick off the stats counters.
pub fn section_in_view(bbox: &BoundingBox, viewport_height: f64) -> bool {
    bbox.top < viewport_height && bbox.bottom > 0.0
}

/// The element's top edge has passed `fraction` of the viewport height.
pub fn section_reached(bbox: &BoundingBox, viewport_height: f64, fraction: f64) -> bool {
    bbox.top < viewport_height * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_policy_uses_fraction_of_viewport() {
        let policy = RevealPolicy::default();
        // 1000 * 0.85 = 850
        assert!(policy.is_in_viewport(&BoundingBox::new(849.0, 50.0), 1000.0));
        assert!(!policy.is_in_viewport(&BoundingBox::new(850.0, 50.0), 1000.0));
    }

    #[test]
    fn margin_policy_uses_fixed_offset() {
        let policy = RevealPolicy::Margin { px: 100.0 };
        assert!(policy.is_in_viewport(&BoundingBox::new(699.0, 50.0), 800.0));
        assert!(!policy.is_in_viewport(&BoundingBox::new(700.0, 50.0), 800.0));
    }

    #[test]
    fn policies_disagree_in_between() {
        let bbox = BoundingBox::new(650.0, 40.0);
        let threshold = RevealPolicy::Threshold { fraction: 0.15 };
        let margin = RevealPolicy::Margin { px: 100.0 };

        assert!(!threshold.is_in_viewport(&bbox, 760.0));
        assert!(margin.is_in_viewport(&bbox, 760.0));
    }

    #[test]
    fn zero_height_elements_never_reveal() {
        let bbox = BoundingBox::new(-500.0, 0.0);
        assert!(!RevealPolicy::default().is_in_viewport(&bbox, 1000.0));
        assert!(!RevealPolicy::Margin { px: 100.0 }.is_in_viewport(&bbox, 1000.0));
    }

    #[test]
    fn section_in_view_requires_overlap() {
        assert!(section_in_view(&BoundingBox::new(-10.0, 20.0), 600.0));
        assert!(section_in_view(&BoundingBox::new(599.0, 20.0), 600.0));
        assert!(!section_in_view(&BoundingBox::new(600.0, 20.0), 600.0));
        assert!(!section_in_view(&BoundingBox::new(-20.0, 20.0), 600.0));
    }

    #[test]
    fn section_reached_at_eighty_five_percent() {
        assert!(section_reached(&BoundingBox::new(849.0, 300.0), 1000.0, 0.85));
        assert!(!section_reached(&BoundingBox::new(851.0, 300.0), 1000.0, 0.85));
    }
}
