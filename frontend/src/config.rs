use crate::contact::ContactSettings;
use crate::dom::styles;
use crate::motion::counter::Easing;
use crate::motion::reveal::Stagger;
use crate::motion::visibility::RevealPolicy;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const EMAILJS_SERVICE_ID: &str = "service_jey3m5a";
pub const EMAILJS_TEMPLATE_ID: &str = "template_ldzwpum";

pub fn emailjs_public_key() -> &'static str {
    option_env!("EMAILJS_PUBLIC_KEY").unwrap_or("")
}

#[cfg(debug_assertions)]
pub fn mail_delivery_enabled() -> bool {
    false // Local builds never send real mail
}

#[cfg(not(debug_assertions))]
pub fn mail_delivery_enabled() -> bool {
    true
}

pub const SUCCESS_MESSAGE: &str =
    "¡Mensaje enviado correctamente! Nos pondremos en contacto contigo pronto.";
pub const ERROR_MESSAGE: &str =
    "Ha ocurrido un error al enviar el mensaje. Por favor, inténtalo de nuevo.";

/// Which build of the site the page is. Read from `<body data-variant>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SiteVariant {
    #[default]
    Base,
    V1,
    V2,
    Premium,
}

impl SiteVariant {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("v1") => SiteVariant::V1,
            Some("v2") => SiteVariant::V2,
            Some("premium") | Some("gest") => SiteVariant::Premium,
            _ => SiteVariant::Base,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SiteVariant::Base => "base",
            SiteVariant::V1 => "v1",
            SiteVariant::V2 => "v2",
            SiteVariant::Premium => "premium",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealDriver {
    /// Re-check pending elements on every scroll tick.
    Poll,
    /// Let an `IntersectionObserver` push crossings.
    Observe { root_margin: &'static str },
}

#[derive(Clone, Debug)]
pub struct RevealSettings {
    pub selector: &'static str,
    pub driver: RevealDriver,
    pub policy: RevealPolicy,
    pub stagger: Stagger,
    /// Added when the element is registered.
    pub pending_class: Option<&'static str>,
    /// Added when the element is revealed.
    pub revealed_classes: &'static [&'static str],
    /// CSS property that carries the stagger.
    pub delay_property: &'static str,
    pub stylesheet: Option<&'static str>,
}

#[derive(Clone, Copy, Debug)]
pub struct CounterSettings {
    pub duration_ms: f64,
    pub easing: Easing,
}

#[derive(Clone, Copy, Debug)]
pub struct ToastStyle {
    pub with_icon: bool,
    pub stylesheet: Option<&'static str>,
    pub dismiss_after_ms: u32,
    pub exit_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallax {
    None,
    /// Sets `--parallax` on `.hero` while the hero is on screen.
    HeroVar,
    /// Translates `.hero__bg img` while the first screen is on screen.
    HeroImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldFlags {
    None,
    /// `has-value` on filled inputs.
    Value,
    /// `has-value`, plus `focused` on the parent group.
    ValueAndFocus,
}

#[derive(Clone, Debug)]
pub struct SiteSettings {
    pub variant: SiteVariant,
    pub header_scrolled_after: f64,
    pub nav_section_lead: f64,
    pub close_menu_on_outside_click: bool,
    pub scroll_throttle_ms: f64,
    pub reveal: RevealSettings,
    pub counters: CounterSettings,
    pub contact: ContactSettings,
    pub live_mail: bool,
    pub simulated_delivery_ms: u32,
    pub loading_label: &'static str,
    pub spinner_stylesheet: Option<&'static str>,
    pub toast: ToastStyle,
    pub parallax: Parallax,
    pub field_flags: FieldFlags,
    pub scroll_to_top_on_load: bool,
    pub hero_intro: bool,
    pub highlights: bool,
    pub ripple: bool,
    pub scroll_progress: bool,
    pub section_reveal: bool,
}

const POLL_MARGIN: RevealPolicy = RevealPolicy::Margin { px: 100.0 };

const CARDS: &str = ".servicio__card, .stat, .contacto__card, .feature";

const SPINNER_LABEL: &str = r#"<svg class="spinner" viewBox="0 0 24 24" style="width: 20px; height: 20px; animation: spin 1s linear infinite;"><circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="3" fill="none" stroke-dasharray="30 70"></circle></svg> Enviando..."#;

impl SiteSettings {
    pub fn for_variant(variant: SiteVariant) -> Self {
        let base = Self::base();
        match variant {
            SiteVariant::Base => base,
            SiteVariant::V1 => Self {
                variant,
                reveal: RevealSettings {
                    selector: ".servicio, .stat, .contacto__card, .nosotros__features li",
                    stagger: Stagger::Cycle { period: 3, step_ms: 100 },
                    revealed_classes: &["revealed"],
                    delay_property: "transition-delay",
                    stylesheet: Some(styles::REVEAL_V1),
                    ..base.reveal
                },
                loading_label: "Enviando...",
                spinner_stylesheet: None,
                toast: ToastStyle {
                    with_icon: false,
                    stylesheet: Some(styles::TOAST_MIDNIGHT),
                    ..base.toast
                },
                parallax: Parallax::None,
                field_flags: FieldFlags::None,
                ..base
            },
            SiteVariant::V2 => Self {
                variant,
                reveal: RevealSettings {
                    stagger: Stagger::Cycle { period: 3, step_ms: 100 },
                    revealed_classes: &["revealed"],
                    delay_property: "transition-delay",
                    stylesheet: Some(styles::REVEAL_V2),
                    ..base.reveal
                },
                counters: CounterSettings {
                    duration_ms: 2500.0,
                    easing: Easing::LinearStep,
                },
                loading_label: "<span>Enviando...</span>",
                spinner_stylesheet: None,
                toast: ToastStyle {
                    with_icon: false,
                    stylesheet: Some(styles::TOAST_CHARCOAL),
                    ..base.toast
                },
                parallax: Parallax::HeroImage,
                field_flags: FieldFlags::None,
                ..base
            },
            SiteVariant::Premium => Self {
                variant,
                reveal: RevealSettings {
                    selector: ".servicio__card, .feature, .contacto__card, .section__header, \
                               .nosotros__text, .nosotros__empresas, .servicios__nota, .contacto__form",
                    driver: RevealDriver::Observe {
                        root_margin: "0px 0px -80px 0px",
                    },
                    policy: RevealPolicy::Threshold { fraction: 0.15 },
                    stagger: Stagger::Cycle { period: 6, step_ms: 100 },
                    pending_class: Some("animate-on-scroll"),
                    revealed_classes: &["animate-visible"],
                    delay_property: "transition-delay",
                    stylesheet: None,
                },
                counters: CounterSettings {
                    duration_ms: 2500.0,
                    easing: Easing::QuarticOut,
                },
                contact: ContactSettings {
                    success_overlay: true,
                    ..base.contact
                },
                live_mail: mail_delivery_enabled(),
                spinner_stylesheet: None,
                toast: ToastStyle {
                    stylesheet: None,
                    ..base.toast
                },
                parallax: Parallax::None,
                field_flags: FieldFlags::ValueAndFocus,
                scroll_to_top_on_load: true,
                hero_intro: true,
                highlights: true,
                ripple: true,
                scroll_progress: true,
                section_reveal: true,
                ..base
            },
        }
    }

    fn base() -> Self {
        Self {
            variant: SiteVariant::Base,
            header_scrolled_after: 100.0,
            nav_section_lead: 200.0,
            close_menu_on_outside_click: false,
            scroll_throttle_ms: 16.0,
            reveal: RevealSettings {
                selector: CARDS,
                driver: RevealDriver::Poll,
                policy: POLL_MARGIN,
                stagger: Stagger::Linear { step_ms: 100 },
                pending_class: None,
                revealed_classes: &["animate-on-scroll", "animated"],
                delay_property: "animation-delay",
                stylesheet: Some(styles::REVEAL_BASE),
            },
            counters: CounterSettings {
                duration_ms: 2000.0,
                easing: Easing::LinearStep,
            },
            contact: ContactSettings::default(),
            live_mail: false,
            simulated_delivery_ms: 1500,
            loading_label: SPINNER_LABEL,
            spinner_stylesheet: Some(styles::SPINNER),
            toast: ToastStyle {
                with_icon: true,
                stylesheet: Some(styles::TOAST_LIGHT),
                dismiss_after_ms: 5000,
                exit_ms: 400,
            },
            parallax: Parallax::HeroVar,
            field_flags: FieldFlags::Value,
            scroll_to_top_on_load: false,
            hero_intro: false,
            highlights: false,
            ripple: false,
            scroll_progress: false,
            section_reveal: false,
        }
    }
}
