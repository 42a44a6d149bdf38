use thiserror::Error;

/// Why a component could not attach itself to the page.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("{component}: missing required element `{selector}`")]
    MissingElement {
        component: &'static str,
        selector: String,
    },
    #[error("{component}: browser call failed: {message}")]
    Browser {
        component: &'static str,
        message: String,
    },
}

impl InitError {
    pub fn missing(component: &'static str, selector: impl Into<String>) -> Self {
        Self::MissingElement {
            component,
            selector: selector.into(),
        }
    }

    pub fn component(&self) -> &'static str {
        match self {
            Self::MissingElement { component, .. } | Self::Browser { component, .. } => component,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn js_error(component: &'static str) -> impl Fn(wasm_bindgen::JsValue) -> InitError {
    move |value| InitError::Browser {
        component,
        message: format!("{value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_message_names_component_and_selector() {
        let error = InitError::missing("theme", "#themeToggle");

        assert_eq!(error.component(), "theme");
        assert_eq!(
            error.to_string(),
            "theme: missing required element `#themeToggle`"
        );
    }
}
