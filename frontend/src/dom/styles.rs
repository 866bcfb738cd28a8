//! Stylesheets injected by variants whose page CSS doesn't cover the
//! runtime-created states.

pub const REVEAL_BASE: &str = r#"
    .servicio__card,
    .stat,
    .contacto__card,
    .feature {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.6s ease, transform 0.6s ease;
    }

    .servicio__card.animated,
    .stat.animated,
    .contacto__card.animated,
    .feature.animated {
        opacity: 1;
        transform: translateY(0);
    }
"#;

pub const REVEAL_V1: &str = r#"
    .servicio,
    .stat,
    .contacto__card,
    .nosotros__features li {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.6s ease, transform 0.6s ease;
    }

    .servicio.revealed,
    .stat.revealed,
    .contacto__card.revealed,
    .nosotros__features li.revealed {
        opacity: 1;
        transform: translateY(0);
    }
"#;

pub const REVEAL_V2: &str = r#"
    .servicio__card,
    .stat,
    .contacto__card,
    .feature {
        opacity: 0;
        transform: translateY(40px);
        transition: opacity 0.7s ease, transform 0.7s ease;
    }

    .servicio__card.revealed,
    .stat.revealed,
    .contacto__card.revealed,
    .feature.revealed {
        opacity: 1;
        transform: translateY(0);
    }
"#;

pub const SPINNER: &str = r#"
    @keyframes spin {
        from { transform: rotate(0deg); }
        to { transform: rotate(360deg); }
    }
"#;

const TOAST_FRAME: &str = r#"
    .notification {
        position: fixed;
        top: 100px;
        right: 20px;
        max-width: 400px;
        padding: 20px 24px;
        border-radius: 12px;
        display: flex;
        align-items: center;
        justify-content: space-between;
        gap: 16px;
        z-index: 10000;
        animation: slideIn 0.4s ease;
    }
    @keyframes slideIn {
        from { opacity: 0; transform: translateX(100px); }
        to { opacity: 1; transform: translateX(0); }
    }
    .notification__close {
        background: none;
        border: none;
        font-size: 1.5rem;
        cursor: pointer;
        padding: 0;
        line-height: 1;
    }
"#;

pub const TOAST_LIGHT: &str = r#"
    .notification {
        background: white;
        box-shadow: 0 10px 40px rgba(0, 0, 0, 0.15);
    }
    .notification__content { display: flex; align-items: center; gap: 12px; }
    .notification__icon {
        width: 28px;
        height: 28px;
        display: flex;
        align-items: center;
        justify-content: center;
        border-radius: 50%;
        font-weight: bold;
        color: white;
    }
    .notification--success .notification__icon { background: #10B981; }
    .notification--error .notification__icon { background: #EF4444; }
    .notification__message { font-size: 0.9375rem; color: #1A1612; }
    .notification__close { color: #6B6560; }
    .notification__close:hover { color: #1A1612; }
"#;

pub const TOAST_MIDNIGHT: &str = r#"
    .notification { background: #0a0a0a; color: #fff; }
    .notification--success { border-left: 3px solid #b8860b; }
    .notification--error { border-left: 3px solid #ef4444; }
    .notification__close { color: rgba(255,255,255,0.6); }
    .notification__close:hover { color: #fff; }
"#;

pub const TOAST_CHARCOAL: &str = r#"
    .notification {
        background: #1f1f1f;
        color: #fff;
        border: 1px solid rgba(255,255,255,0.1);
    }
    .notification--success { border-left: 3px solid #c9a227; }
    .notification--error { border-left: 3px solid #ef4444; }
    .notification__close { color: rgba(255,255,255,0.5); }
    .notification__close:hover { color: #fff; }
"#;

/// Shared box and slide animation, prepended to every toast theme.
pub fn toast_sheet(theme: &str) -> String {
    format!("{}{}", TOAST_FRAME, theme)
}
