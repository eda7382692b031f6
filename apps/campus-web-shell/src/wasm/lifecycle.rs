use super::*;

#[derive(Debug, Error)]
pub(super) enum BootError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Buffers one formatted event and writes it to the browser console.
pub(super) struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl std::io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&JsValue::from_str(line));
        }
    }
}

pub(super) fn install_console_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(|| ConsoleWriter { buffer: Vec::new() })
        .without_time()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

fn page_base_url_override(window: &web_sys::Window) -> Option<String> {
    js_sys::Reflect::get(window, &JsValue::from_str(BASE_URL_GLOBAL))
        .ok()
        .and_then(|value| value.as_string())
}

pub(super) async fn boot() -> Result<(), BootError> {
    let window = web_sys::window().ok_or(SurfaceError::MissingWindow)?;
    let document = window.document().ok_or(SurfaceError::MissingDocument)?;
    let role = detect_role(|id| document.get_element_by_id(id).is_some())
        .ok_or(SurfaceError::MissingRoleContainer)?;

    let (config, source) = resolve_client_config(page_base_url_override(&window))?;
    tracing::info!(
        role = role.as_str(),
        base_url = %config.base_url,
        source,
        "campus dashboard booting"
    );
    let session = Session::load(&LocalStorageTokenStore::new(window.clone()));
    if session.is_anonymous() {
        tracing::info!("no stored auth token; requests are sent anonymously");
    }

    let surface = WebSurface::attach(&document, role)?;
    let dashboard = Rc::new(Dashboard::new(
        role,
        ApiClient::new(config, session, GlooTransport),
        surface,
    ));
    DASHBOARD.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&dashboard)));
    install_page_handlers(&document);

    dashboard.start().await;
    Ok(())
}

pub(super) fn current_dashboard() -> Option<Rc<WebDashboard>> {
    DASHBOARD.with(|slot| slot.borrow().clone())
}
