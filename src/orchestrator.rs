use log::Level;
use serde_json::json;

use crate::error::InitError;
use crate::logging::log_event;

pub type Mount<S> = fn(&S) -> Result<(), InitError>;

#[derive(Debug, Default)]
pub struct InitReport {
    pub started: Vec<&'static str>,
    pub failed: Vec<InitError>,
}

/// `document.readyState` values other than `loading` mean the DOM is parsed.
pub fn document_is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Mounts `components` in order. A failing component is logged and skipped;
/// the ones before it stay active and the ones after it still get their turn.
pub fn initialize_all<S>(session: &S, components: &[(&'static str, Mount<S>)]) -> InitReport {
    let mut report = InitReport::default();

    for (name, mount) in components {
        match mount(session) {
            Ok(()) => {
                log::debug!("{name} ready");
                report.started.push(*name);
            }
            Err(error) => {
                log_event(
                    Level::Error,
                    "component_failed",
                    json!({ "component": name, "error": error.to_string() }),
                );
                report.failed.push(error);
            }
        }
    }

    log_event(
        Level::Info,
        "portfolio_initialized",
        json!({ "started": report.started.len(), "failed": report.failed.len() }),
    );
    report
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Page {
        mounted: RefCell<Vec<&'static str>>,
    }

    fn ok_a(page: &Page) -> Result<(), InitError> {
        page.mounted.borrow_mut().push("a");
        Ok(())
    }

    fn broken(_page: &Page) -> Result<(), InitError> {
        Err(InitError::missing("broken", "#nowhere"))
    }

    fn ok_c(page: &Page) -> Result<(), InitError> {
        page.mounted.borrow_mut().push("c");
        Ok(())
    }

    #[test]
    fn failure_is_isolated_to_its_component() {
        let page = Page::default();
        let components: [(&'static str, Mount<Page>); 3] =
            [("a", ok_a), ("broken", broken), ("c", ok_c)];
        let report = initialize_all(&page, &components);

        assert_eq!(report.started, vec!["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].component(), "broken");
        assert_eq!(*page.mounted.borrow(), vec!["a", "c"]);
    }

    #[test]
    fn components_mount_in_declared_order() {
        let page = Page::default();
        let components: [(&'static str, Mount<Page>); 2] = [("c", ok_c), ("a", ok_a)];
        initialize_all(&page, &components);

        assert_eq!(*page.mounted.borrow(), vec!["c", "a"]);
    }

    #[test]
    fn only_loading_defers_start() {
        assert!(!document_is_parsed("loading"));
        assert!(document_is_parsed("interactive"));
        assert!(document_is_parsed("complete"));
    }
}
