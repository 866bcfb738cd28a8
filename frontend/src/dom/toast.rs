use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::{debug, error};
use web_sys::Element;

use super::page::{set_style, DomError, Page};
use super::styles;
use crate::config::ToastStyle;
use crate::toast::{Mounted, Notification, Severity, ToastId, Toasts};

/// Renders the single active notification and runs its timers.
pub struct NotificationHost {
    page: Page,
    style: ToastStyle,
    toasts: RefCell<Toasts>,
    node: RefCell<Mounted<ToastNode>>,
}

struct ToastNode {
    element: Element,
    _close: Option<EventListener>,
}

impl NotificationHost {
    pub fn new(page: Page, style: ToastStyle) -> Rc<Self> {
        Rc::new(Self {
            page,
            style,
            toasts: RefCell::new(Toasts::new(f64::from(style.dismiss_after_ms))),
            node: RefCell::new(Mounted::default()),
        })
    }

    pub fn show(self: &Rc<Self>, message: &str, severity: Severity) {
        let now = self.page.now();
        let (id, evicted) = self.toasts.borrow_mut().show(message, severity, now);
        if let Some(old) = evicted {
            debug!(
                "Replacing {:?} notification shown at {:.0}ms",
                old.severity, old.created_at
            );
        }
        // Anything the page left behind goes too, not just our own node.
        for stale in self.page.query_all(".notification") {
            stale.remove();
        }
        self.node.borrow_mut().clear();

        if let Some(css) = self.style.stylesheet {
            self.page
                .inject_stylesheet(Some("notification-styles"), &styles::toast_sheet(css));
        }

        let Some(notification) = self.toasts.borrow().current().cloned() else {
            return;
        };
        let node = match self.render(&notification) {
            Ok(node) => node,
            Err(e) => {
                error!("Could not render notification: {}", e);
                self.toasts.borrow_mut().remove(id);
                return;
            }
        };
        let _ = self.page.body.append_child(&node);

        let close = node
            .query_selector(".notification__close")
            .ok()
            .flatten()
            .map(|button| {
                let host = Rc::clone(self);
                EventListener::new(&button, "click", move |_| {
                    if host.toasts.borrow_mut().remove(id) {
                        host.detach(id);
                    }
                })
            });
        self.node.borrow_mut().attach(
            id,
            ToastNode {
                element: node,
                _close: close,
            },
        );

        let visible_for = (notification.dismiss_at - notification.created_at).max(0.0) as u32;
        let host = Rc::clone(self);
        Timeout::new(visible_for, move || host.expire(id)).forget();
    }

    fn expire(self: &Rc<Self>, id: ToastId) {
        if !self.toasts.borrow_mut().begin_exit(id) {
            return;
        }
        if let Some(mounted) = self.node.borrow().get(id) {
            set_style(&mounted.element, "animation", "slideIn 0.4s ease reverse");
        }
        let host = Rc::clone(self);
        Timeout::new(self.style.exit_ms, move || {
            if host.toasts.borrow_mut().remove(id) {
                host.detach(id);
            }
        })
        .forget();
    }

    fn detach(&self, id: ToastId) {
        let released = self.node.borrow_mut().release(id);
        if let Some(mounted) = released {
            mounted.element.remove();
        }
    }

    fn render(&self, notification: &Notification) -> Result<Element, DomError> {
        let severity = notification.severity;
        let document = &self.page.document;
        let root = document.create_element("div")?;
        root.set_class_name(&format!("notification {}", severity.class_name()));

        let text = document.create_element("span")?;
        text.set_text_content(Some(&notification.message));

        if self.style.with_icon {
            let content = document.create_element("div")?;
            content.set_class_name("notification__content");
            let icon = document.create_element("span")?;
            icon.set_class_name("notification__icon");
            icon.set_text_content(Some(severity.icon()));
            text.set_class_name("notification__message");
            content.append_child(&icon)?;
            content.append_child(&text)?;
            root.append_child(&content)?;
        } else {
            root.append_child(&text)?;
        }

        let close = document.create_element("button")?;
        close.set_class_name("notification__close");
        close.set_text_content(Some("×"));
        root.append_child(&close)?;
        Ok(root)
    }
}
