use std::cell::Cell;

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Icon shows where the toggle leads, not the current theme.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

/// Stored preference, or light when absent or unrecognized.
pub fn resolve_theme(stored: Option<&str>) -> Theme {
    stored.and_then(Theme::parse).unwrap_or(Theme::Light)
}

pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str);
}

/// Where a theme becomes visible: the root attribute and the toggle icon.
/// `apply_animated` may land the change later than it returns.
pub trait ThemeSurface {
    fn apply(&self, theme: Theme);

    fn apply_animated(&self, theme: Theme) {
        self.apply(theme);
    }
}

pub struct ThemeController<S, P> {
    surface: S,
    store: P,
    current: Cell<Theme>,
}

impl<S: ThemeSurface, P: PreferenceStore> ThemeController<S, P> {
    pub fn new(surface: S, store: P) -> Self {
        let theme = resolve_theme(store.load(THEME_KEY).as_deref());
        let controller = Self {
            surface,
            store,
            current: Cell::new(theme),
        };
        controller.set_theme(theme);
        controller
    }

    pub fn set_theme(&self, theme: Theme) {
        self.current.set(theme);
        self.surface.apply(theme);
        self.store.save(THEME_KEY, theme.as_str());
    }

    /// Flips the last theme handed out, which may not be on the page yet.
    pub fn toggle(&self) -> Theme {
        let next = self.current.get().toggled();
        self.current.set(next);
        self.surface.apply_animated(next);
        self.store.save(THEME_KEY, next.as_str());
        next
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::mount;

#[cfg(target_arch = "wasm32")]
mod dom {
    use js_sys::{Function, Reflect};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{Document, Element, HtmlElement, Storage};

    use super::{PreferenceStore, Theme, ThemeController, ThemeSurface};
    use crate::error::InitError;
    use crate::session::{listen, PageSession};

    const COMPONENT: &str = "theme";

    struct LocalPreferenceStore(Option<Storage>);

    impl PreferenceStore for LocalPreferenceStore {
        fn load(&self, key: &str) -> Option<String> {
            self.0.as_ref()?.get_item(key).ok().flatten()
        }

        fn save(&self, key: &str, value: &str) {
            if let Some(storage) = self.0.as_ref() {
                let _ = storage.set_item(key, value);
            }
        }
    }

    #[derive(Clone)]
    struct DomThemeSurface {
        document: Document,
        root: Element,
        toggle: HtmlElement,
        icon: Element,
        reduced_motion: bool,
    }

    impl ThemeSurface for DomThemeSurface {
        fn apply(&self, theme: Theme) {
            let _ = self.root.set_attribute("data-theme", theme.as_str());
            self.icon.set_text_content(Some(theme.icon()));
            let _ = self.toggle.set_attribute("aria-label", &theme.toggle_label());
            let _ = self
                .toggle
                .set_attribute("aria-pressed", &theme.pressed().to_string());
        }

        fn apply_animated(&self, theme: Theme) {
            if self.reduced_motion {
                self.apply(theme);
                return;
            }

            let document_js: JsValue = self.document.clone().into();
            let Ok(start_view_transition) =
                Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
            else {
                self.apply(theme);
                return;
            };

            let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
                self.apply(theme);
                return;
            };

            let surface = self.clone();
            let callback = Closure::once_into_js(move || surface.apply(theme));

            if start_view_transition.call1(&document_js, &callback).is_err() {
                self.apply(theme);
            }
        }
    }

    pub fn mount(session: &PageSession) -> Result<(), InitError> {
        let toggle = session.require_id(COMPONENT, "themeToggle")?;
        let icon = toggle
            .query_selector(".theme-icon")
            .ok()
            .flatten()
            .ok_or_else(|| InitError::missing(COMPONENT, "#themeToggle .theme-icon"))?;
        let root = session
            .document()
            .document_element()
            .ok_or_else(|| InitError::missing(COMPONENT, "html"))?;

        let surface = DomThemeSurface {
            document: session.document().clone(),
            root,
            toggle: toggle.clone(),
            icon,
            reduced_motion: session.prefers_reduced_motion(),
        };
        let controller =
            ThemeController::new(surface, LocalPreferenceStore(session.local_storage()));
        log::debug!("theme applied: {}", controller.current().as_str());

        listen(&toggle, COMPONENT, "click", move |_| {
            let next = controller.toggle();
            log::debug!("theme toggled to {}", next.as_str());
        })
    }
}
