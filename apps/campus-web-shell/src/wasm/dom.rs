use super::*;

#[derive(Debug, Error)]
pub(super) enum SurfaceError {
    #[error("window is unavailable")]
    MissingWindow,
    #[error("document is unavailable")]
    MissingDocument,
    #[error("no role container found on the page")]
    MissingRoleContainer,
    #[error("{0}")]
    Dom(String),
}

fn dom_error(context: &str) -> impl FnOnce(JsValue) -> SurfaceError + '_ {
    move |error| SurfaceError::Dom(format!("{context}: {error:?}"))
}

/// DOM-backed surface for one role container.
pub(super) struct WebSurface {
    document: Document,
    container: Element,
}

impl WebSurface {
    pub(super) fn attach(document: &Document, role: Role) -> Result<Self, SurfaceError> {
        let container = document
            .get_element_by_id(role.container_id())
            .ok_or(SurfaceError::MissingRoleContainer)?;
        Ok(Self {
            document: document.clone(),
            container,
        })
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, root: &Element, selector: &str) -> Vec<Element> {
        let Ok(nodes) = root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn loading_overlay(&self) -> Result<HtmlElement, SurfaceError> {
        if self.document.get_element_by_id(LOADING_STYLE_ID).is_none() {
            let style = self
                .document
                .create_element("style")
                .map_err(dom_error("failed to create loading style"))?;
            style.set_id(LOADING_STYLE_ID);
            style.set_text_content(Some(LOADING_OVERLAY_CSS));
            let head = self.document.head().ok_or(SurfaceError::MissingDocument)?;
            head.append_child(&style)
                .map_err(dom_error("failed to append loading style"))?;
        }

        if let Some(existing) = self.document.get_element_by_id(LOADING_OVERLAY_ID) {
            return existing
                .dyn_into::<HtmlElement>()
                .map_err(|_| SurfaceError::Dom("loading overlay is not HtmlElement".to_string()));
        }
        let overlay = self
            .document
            .create_element("div")
            .map_err(dom_error("failed to create loading overlay"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SurfaceError::Dom("loading overlay is not HtmlElement".to_string()))?;
        overlay.set_id(LOADING_OVERLAY_ID);
        overlay.set_class_name("loading-overlay");
        overlay.set_inner_html(&loading_overlay());
        let body = self.document.body().ok_or(SurfaceError::MissingDocument)?;
        body.append_child(&overlay)
            .map_err(dom_error("failed to append loading overlay"))?;
        Ok(overlay)
    }

    fn set_loading_display(&self, display: &str) {
        let result = self.loading_overlay().and_then(|overlay| {
            overlay
                .style()
                .set_property("display", display)
                .map_err(dom_error("failed to toggle loading overlay"))
        });
        if let Err(error) = result {
            tracing::debug!(%error, "loading overlay unavailable");
        }
    }

    fn insert_banner(&self, notification: &Notification) -> Result<Element, SurfaceError> {
        let holder = self
            .document
            .create_element("div")
            .map_err(dom_error("failed to create banner"))?;
        holder.set_inner_html(&banner(notification));
        let element = holder
            .first_element_child()
            .ok_or_else(|| SurfaceError::Dom("banner markup is empty".to_string()))?;
        self.container
            .prepend_with_node_1(&element)
            .map_err(dom_error("failed to insert banner"))?;
        Ok(element)
    }

    fn trigger_download(&self, export: &CsvExport) -> Result<(), SurfaceError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(&export.content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(export.mime_type);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(dom_error("failed to create export blob"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(dom_error("failed to create export url"))?;

        let link = self
            .document
            .create_element("a")
            .map_err(dom_error("failed to create download link"))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| SurfaceError::Dom("download link is not HtmlAnchorElement".to_string()))?;
        link.set_href(&url);
        link.set_download(&export.file_name);
        link.style()
            .set_property("visibility", "hidden")
            .map_err(dom_error("failed to hide download link"))?;
        let body = self.document.body().ok_or(SurfaceError::MissingDocument)?;
        body.append_child(&link)
            .map_err(dom_error("failed to append download link"))?;
        link.click();
        link.remove();
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
}

/// Current value of a form control, or `None` for anything else.
fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    element
        .dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
}

impl DashboardSurface for WebSurface {
    fn render_container(&self, html: &str) {
        self.container.set_inner_html(html);
    }

    fn set_html(&self, selector: &str, html: &str) {
        if let Some(element) = self.query(selector) {
            element.set_inner_html(html);
        }
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(element) = self.query(selector) {
            element.set_text_content(Some(text));
        }
    }

    fn mark_active_menu(&self, section: &str) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        for link in self.query_all(&root, SIDEBAR_LINK_SELECTOR) {
            let class_list = link.class_list();
            if link.get_attribute(SECTION_ATTRIBUTE).as_deref() == Some(section) {
                let _ = class_list.add_1(ACTIVE_CLASS);
            } else {
                let _ = class_list.remove_1(ACTIVE_CLASS);
            }
        }
    }

    fn show_loading(&self) {
        self.set_loading_display("flex");
    }

    fn hide_loading(&self) {
        self.set_loading_display("none");
    }

    fn show_banner(&self, notification: &Notification) {
        match self.insert_banner(notification) {
            Ok(element) => {
                let expiry = notification.expiry();
                spawn_local(async move {
                    sleep(expiry).await;
                    element.remove();
                });
            }
            Err(error) => tracing::debug!(%error, "banner not shown"),
        }
    }

    fn remove_banners(&self, kind: NotificationKind) {
        for banner in self.query_all(&self.container, kind.selector()) {
            banner.remove();
        }
    }

    fn field_value(&self, selector: &str) -> Option<String> {
        self.query(selector).as_ref().and_then(control_value)
    }

    fn row_values(&self, table_body: &str, cells: &[&str]) -> Vec<Vec<Option<String>>> {
        let Some(body) = self.query(table_body) else {
            return Vec::new();
        };
        self.query_all(&body, "tr")
            .iter()
            .map(|row| {
                cells
                    .iter()
                    .map(|cell| {
                        let element = row.query_selector(cell).ok().flatten()?;
                        control_value(&element).or_else(|| element.text_content())
                    })
                    .collect()
            })
            .collect()
    }

    fn reset_form(&self, form_id: &str) {
        if let Some(form) = self
            .document
            .get_element_by_id(form_id)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn download(&self, export: &CsvExport) {
        if let Err(error) = self.trigger_download(export) {
            tracing::warn!(%error, file = %export.file_name, "csv download failed");
        }
    }
}
