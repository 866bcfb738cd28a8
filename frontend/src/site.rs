use log::{info, warn};

use crate::config::{SiteSettings, SiteVariant};
use crate::dom::contact::{bind_contact, bind_field_flags};
use crate::dom::counters::bind_counters;
use crate::dom::effects::bind_effects;
use crate::dom::nav::{bind_header, bind_navigation, bind_smooth_anchors};
use crate::dom::page::{DomError, Page};
use crate::dom::reveal::{bind_highlights, bind_reveal};
use crate::dom::toast::NotificationHost;

/// Attaches every behaviour the page's variant asks for. Missing elements
/// switch the matching behaviour off; only a missing window/document/body
/// is an error.
pub fn start() -> Result<(), DomError> {
    let page = Page::current()?;
    let variant = SiteVariant::from_attr(page.body.get_attribute("data-variant").as_deref());
    let settings = SiteSettings::for_variant(variant);
    info!("Booting {} variant", settings.variant.label());

    // Effects first: the premium page scrolls to the top before anything
    // else measures layout.
    bind_effects(&page, &settings);
    bind_header(&page, &settings);
    bind_navigation(&page, &settings);
    bind_smooth_anchors(&page);

    if let Err(e) = bind_reveal(&page, &settings.reveal, settings.scroll_throttle_ms) {
        warn!("Scroll reveal disabled: {}", e);
    }
    if settings.highlights {
        if let Err(e) = bind_highlights(&page) {
            warn!("Highlight animation disabled: {}", e);
        }
    }
    bind_counters(&page, settings.counters, settings.scroll_throttle_ms);

    let notifications = NotificationHost::new(page.clone(), settings.toast);
    bind_contact(&page, &settings, notifications);
    bind_field_flags(&page, settings.field_flags);

    info!("✨ Ricart Cambra S.L. website loaded ({})", settings.variant.label());
    Ok(())
}
