use web_sys::Document;

use crate::error::{PageError, PageResult};

pub const INTERACTION_STYLES: &str = r#"
    .animate-element {
        opacity: 0;
        transform: translateY(30px);
        transition: all 0.6s cubic-bezier(0.4, 0, 0.2, 1);
    }

    .animate-element.animate-in {
        opacity: 1;
        transform: translateY(0);
    }

    .nav-links a.active {
        color: var(--primary-green);
        position: relative;
    }

    .nav-links a.active::after {
        content: '';
        position: absolute;
        bottom: -2px;
        left: 0;
        right: 0;
        height: 2px;
        background: var(--gold-accent);
        border-radius: 1px;
    }

    @media (max-width: 768px) {
        .nav-links {
            position: fixed;
            top: 70px;
            right: -100%;
            width: 280px;
            height: calc(100vh - 70px);
            background: rgba(255, 255, 255, 0.98);
            backdrop-filter: blur(10px);
            flex-direction: column;
            justify-content: flex-start;
            align-items: flex-start;
            padding: 40px 30px;
            gap: 20px;
            transition: right 0.3s cubic-bezier(0.4, 0, 0.2, 1);
            box-shadow: -5px 0 15px rgba(0, 0, 0, 0.1);
        }

        .nav-links.mobile-menu-open {
            right: 0;
        }

        .nav-links a {
            font-size: 1.1rem;
            padding: 12px 0;
            width: 100%;
            border-bottom: 1px solid rgba(45, 95, 63, 0.1);
        }

        .mobile-menu-toggle.active span:nth-child(1) {
            transform: rotate(45deg) translate(6px, 6px);
        }

        .mobile-menu-toggle.active span:nth-child(2) {
            opacity: 0;
        }

        .mobile-menu-toggle.active span:nth-child(3) {
            transform: rotate(-45deg) translate(6px, -6px);
        }
    }

    .circle {
        animation: float 6s ease-in-out infinite;
    }

    .circle:hover {
        animation-play-state: paused;
        transform: scale(1.1);
    }

    .primary-button:active,
    .secondary-button:active {
        transform: translateY(0);
    }

    .form-group input:focus,
    .form-group textarea:focus {
        transform: translateY(-1px);
    }

    .audience-card,
    .point,
    .benefit-item {
        transition: all 0.3s cubic-bezier(0.4, 0, 0.2, 1);
    }
"#;

pub const LOAD_FADE_STYLES: &str = r#"
    body:not(.loaded) {
        opacity: 0;
    }

    body.loaded {
        opacity: 1;
        transition: opacity 0.3s ease-in-out;
    }
"#;

pub const LOADED_CLASS: &str = "loaded";

/// Appends a `<style>` block to the document head.
pub fn inject(document: &Document, css: &str) -> PageResult<()> {
    let head = document.head().ok_or(PageError::MissingGlobal("document.head"))?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(())
}
