use super::*;

/// Delegated listeners on the document: section links and stat cards,
/// export buttons, form submits and roster filter changes.
pub(super) fn install_page_handlers(document: &Document) {
    CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            handle_click(event);
        }));
        let _ = document.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    SUBMIT_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            handle_submit(event);
        }));
        let _ = document.add_event_listener_with_callback("submit", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    CHANGE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            handle_change(event);
        }));
        let _ = document.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(super) fn handle_click(event: web_sys::Event) {
    let Some(target) = event_element(&event) else {
        return;
    };

    let export_selector = format!("[{ACTION_ATTRIBUTE}=\"{EXPORT_ACTION}\"]");
    if target.closest(&export_selector).ok().flatten().is_some() {
        event.prevent_default();
        if let Some(dashboard) = current_dashboard() {
            let _ = dashboard.export_section();
        }
        return;
    }

    let Some(section) = target
        .closest(&format!("[{SECTION_ATTRIBUTE}]"))
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute(SECTION_ATTRIBUTE))
    else {
        return;
    };
    event.prevent_default();
    spawn_select_section(section);
}

pub(super) fn spawn_select_section(section: String) {
    let Some(dashboard) = current_dashboard() else {
        return;
    };
    spawn_local(async move {
        dashboard.select_section(&section).await;
    });
}

pub(super) fn handle_submit(event: web_sys::Event) {
    let Some(form_id) = event_element(&event)
        .filter(|element| element.dyn_ref::<HtmlFormElement>().is_some())
        .map(|form| form.id())
    else {
        return;
    };
    let Some(dashboard) = current_dashboard() else {
        return;
    };
    if owned_form(dashboard.role(), &form_id).is_none() {
        return;
    }
    event.prevent_default();
    spawn_local(async move {
        let outcome = dashboard.submit_form(&form_id).await;
        tracing::debug!(form = %form_id, ?outcome, "form submission settled");
    });
}

pub(super) fn handle_change(event: web_sys::Event) {
    let Some(kind) = event_element(&event).and_then(|element| roster_form_for_select(&element.id()))
    else {
        return;
    };
    let Some(dashboard) = current_dashboard() else {
        return;
    };
    spawn_local(async move {
        dashboard.refresh_roster(kind).await;
    });
}
