//! Browser handle exported to the host page.
//!
//! [`FloorPlanEditor::mount`] builds the whole editor inside a root element:
//! the palette of draggable kinds, the Rotate / Save / Load buttons, the info
//! panel and the canvas. It binds their DOM events to the engine. A page that
//! lays out its own markup can instead construct the editor over a bare
//! canvas and forward events to the `mouse_*` / `drop_element` / `rotate`
//! methods.
//!
//! Every event runs the engine and then acts on the returned actions:
//! `RenderNeeded` redraws the canvas and [`host::controls_stale`] decides
//! whether the rotate button and info panel need refreshing. Save and load
//! return promises that resolve to `true` on success and `false` after the
//! failure has been logged and alerted.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Date, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, DragEvent, Element, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement, MouseEvent};

use crate::api::{self, LOAD_FAILED_ALERT, SAVE_FAILED_ALERT};
use crate::camera::Point;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::engine::{Action, Engine};
use crate::host::{self, Control, ControlState, DRAG_FORMAT, PALETTE};

type Listener = Closure<dyn FnMut(Event)>;

/// Install the panic hook and console logger once the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("console logger already installed: {e}");
    }
}

/// Elements outside the canvas that reflect engine state.
struct Chrome {
    rotate: HtmlButtonElement,
    info: Element,
}

struct Inner {
    engine: RefCell<Engine>,
    base_url: RefCell<String>,
    chrome: RefCell<Option<Chrome>>,
}

impl Inner {
    fn new(canvas: HtmlCanvasElement, base_url: String) -> Rc<Self> {
        Rc::new(Self {
            engine: RefCell::new(Engine::new(canvas)),
            base_url: RefCell::new(base_url),
            chrome: RefCell::new(None),
        })
    }

    /// Run one engine input and apply its actions to the page.
    fn dispatch(&self, input: impl FnOnce(&mut Engine) -> Vec<Action>) {
        let mut engine = self.engine.borrow_mut();
        let actions = input(&mut engine);
        log_actions(&actions);
        if actions.iter().any(|a| matches!(a, Action::RenderNeeded)) {
            render_or_log(&engine);
        }
        if host::controls_stale(&actions, engine.selection()) {
            self.refresh_chrome(&engine);
        }
    }

    fn refresh_chrome(&self, engine: &Engine) {
        let chrome = self.chrome.borrow();
        let Some(chrome) = chrome.as_ref() else {
            return;
        };
        let state = ControlState::from_core(&engine.core);
        chrome.rotate.set_disabled(!state.rotate_enabled);
        chrome.info.set_text_content(Some(&state.info));
    }

    fn on_control(self: &Rc<Self>, control: Control) {
        match control {
            Control::Rotate => self.dispatch(Engine::rotate_selected),
            Control::Save => {
                let inner = Rc::clone(self);
                spawn_local(async move {
                    save_now(&inner).await;
                });
            }
            Control::Load => {
                let inner = Rc::clone(self);
                spawn_local(async move {
                    load_now(&inner).await;
                });
            }
        }
    }
}

#[wasm_bindgen]
pub struct FloorPlanEditor {
    inner: Rc<Inner>,
    /// DOM listeners created by `mount`; dropping them unbinds the page.
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FloorPlanEditor {
    /// Bind an editor to a canvas element the page laid out itself. The
    /// store defaults to same origin.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> FloorPlanEditor {
        let inner = Inner::new(canvas, String::new());
        render_or_log(&inner.engine.borrow());
        Self { inner, listeners: Vec::new() }
    }

    /// Build the editor page inside `root` and wire all of its events.
    ///
    /// `base_url` points at the layout store; empty means same origin.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if any element cannot be created or attached.
    pub fn mount(root: &Element, base_url: String) -> Result<FloorPlanEditor, JsValue> {
        let document = root
            .owner_document()
            .ok_or_else(|| JsValue::from_str("mount root is not in a document"))?;

        let shell = create(&document, "div", "floorplan")?;
        let sidebar = create(&document, "aside", "sidebar")?;
        let palette = create(&document, "div", "palette")?;
        let controls = create(&document, "div", "controls")?;
        let stage = create(&document, "section", "stage")?;
        let info = create(&document, "p", "info")?;

        let canvas: HtmlCanvasElement = create(&document, "canvas", "surface")?.dyn_into().map_err(JsValue::from)?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let inner = Inner::new(canvas.clone(), base_url);
        let mut listeners = Vec::new();

        for item in PALETTE {
            let tile = create(&document, "div", "palette-item")?;
            tile.set_attribute("draggable", "true")?;
            tile.set_attribute("data-kind", item.payload)?;
            tile.set_text_content(Some(item.kind.label()));
            let payload = item.payload;
            listeners.push(listen(&tile, "dragstart", move |ev| start_drag(&ev, payload))?);
            palette.append_child(&tile)?;
        }

        let mut rotate = None;
        for control in Control::ALL {
            let button: HtmlButtonElement = create(&document, "button", "control")?.dyn_into().map_err(JsValue::from)?;
            button.set_text_content(Some(control.label()));
            let target = Rc::clone(&inner);
            listeners.push(listen(&button, "click", move |_ev| target.on_control(control))?);
            controls.append_child(&button)?;
            if control == Control::Rotate {
                rotate = Some(button);
            }
        }
        let rotate = rotate.ok_or_else(|| JsValue::from_str("rotate control missing"))?;

        listeners.push(listen_mouse(&canvas, "mousedown", &inner, Engine::on_pointer_down)?);
        listeners.push(listen_mouse(&canvas, "mousemove", &inner, Engine::on_pointer_move)?);
        listeners.push(listen_mouse(&canvas, "mouseup", &inner, Engine::on_pointer_up)?);
        listeners.push(listen(&canvas, "dragover", |ev| ev.prevent_default())?);
        let target = Rc::clone(&inner);
        listeners.push(listen(&canvas, "drop", move |ev| {
            ev.prevent_default();
            if let Some((payload, pt)) = drop_payload(&ev) {
                target.dispatch(|engine| engine.on_drop(&payload, pt, now_ms()));
            }
        })?);

        sidebar.append_child(&palette)?;
        sidebar.append_child(&controls)?;
        stage.append_child(&info)?;
        stage.append_child(&canvas)?;
        shell.append_child(&sidebar)?;
        shell.append_child(&stage)?;
        root.append_child(&shell)?;

        *inner.chrome.borrow_mut() = Some(Chrome { rotate, info });
        {
            let engine = inner.engine.borrow();
            inner.refresh_chrome(&engine);
            render_or_log(&engine);
        }
        log::info!("floor plan editor mounted");

        Ok(Self { inner, listeners })
    }

    /// Point persistence at another origin, e.g. `http://localhost:3001`.
    pub fn set_base_url(&self, base_url: String) {
        *self.inner.base_url.borrow_mut() = base_url;
    }

    pub fn mouse_down(&self, client_x: f64, client_y: f64) {
        self.inner.dispatch(|engine| engine.on_pointer_down(Point::new(client_x, client_y)));
    }

    pub fn mouse_move(&self, client_x: f64, client_y: f64) {
        self.inner.dispatch(|engine| engine.on_pointer_move(Point::new(client_x, client_y)));
    }

    pub fn mouse_up(&self, client_x: f64, client_y: f64) {
        self.inner.dispatch(|engine| engine.on_pointer_up(Point::new(client_x, client_y)));
    }

    /// Handle a palette drop. `payload` is the drag data text.
    pub fn drop_element(&self, payload: &str, client_x: f64, client_y: f64) {
        self.inner.dispatch(|engine| engine.on_drop(payload, Point::new(client_x, client_y), now_ms()));
    }

    pub fn rotate(&self) {
        self.inner.dispatch(Engine::rotate_selected);
    }

    #[must_use]
    pub fn can_rotate(&self) -> bool {
        self.inner.engine.borrow().can_rotate()
    }

    #[must_use]
    pub fn selection_summary(&self) -> Option<String> {
        self.inner.engine.borrow().selection_summary()
    }

    /// Number of listeners bound by `mount`.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Redraw the whole canvas.
    ///
    /// # Errors
    ///
    /// Returns the underlying `Canvas2D` error.
    pub fn render(&self) -> Result<(), JsValue> {
        self.inner.engine.borrow().render()
    }

    /// Send the current layout to the store.
    #[must_use]
    pub fn save(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move { Ok(JsValue::from_bool(save_now(&inner).await)) })
    }

    /// Replace the local layout with the stored one.
    #[must_use]
    pub fn load(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move { Ok(JsValue::from_bool(load_now(&inner).await)) })
    }
}

async fn save_now(inner: &Rc<Inner>) -> bool {
    let elements = inner.engine.borrow().snapshot();
    let base = inner.base_url.borrow().clone();
    match api::save_layout(&base, &elements).await {
        Ok(receipt) => {
            log::info!("layout saved: {} ({} elements)", receipt.message, elements.len());
            true
        }
        Err(e) => {
            log::error!("failed to save layout: {e}");
            alert(SAVE_FAILED_ALERT);
            false
        }
    }
}

async fn load_now(inner: &Rc<Inner>) -> bool {
    let base = inner.base_url.borrow().clone();
    match api::load_layout(&base).await {
        Ok(layout) => {
            log::info!("layout loaded ({} elements)", layout.len());
            inner.dispatch(|engine| engine.load_snapshot(layout));
            // A kept selection may have moved or resized.
            inner.refresh_chrome(&inner.engine.borrow());
            true
        }
        Err(e) => {
            log::error!("failed to load layout: {e}");
            alert(LOAD_FAILED_ALERT);
            false
        }
    }
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn listen_mouse(
    target: &EventTarget,
    name: &str,
    inner: &Rc<Inner>,
    input: fn(&mut Engine, Point) -> Vec<Action>,
) -> Result<Listener, JsValue> {
    let inner = Rc::clone(inner);
    listen(target, name, move |ev| {
        let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pt = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        inner.dispatch(|engine| input(engine, pt));
    })
}

fn start_drag(ev: &Event, payload: &str) {
    let Some(transfer) = ev.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) else {
        return;
    };
    if let Err(e) = transfer.set_data(DRAG_FORMAT, payload) {
        log::error!("failed to start drag: {e:?}");
    }
}

fn drop_payload(ev: &Event) -> Option<(String, Point)> {
    let drag = ev.dyn_ref::<DragEvent>()?;
    let transfer = drag.data_transfer()?;
    match transfer.get_data(DRAG_FORMAT) {
        Ok(payload) => Some((payload, Point::new(f64::from(drag.client_x()), f64::from(drag.client_y())))),
        Err(e) => {
            log::error!("failed to read drop payload: {e:?}");
            None
        }
    }
}

fn log_actions(actions: &[Action]) {
    for action in actions {
        match action {
            Action::ElementCreated(el) => log::debug!("created {} {}", el.kind, el.id),
            Action::ElementUpdated { id, fields } => log::trace!("updated {id}: {fields:?}"),
            Action::SelectionChanged(id) => log::debug!("selection changed: {id:?}"),
            Action::RenderNeeded => {}
        }
    }
}

fn render_or_log(engine: &Engine) {
    if let Err(e) = engine.render() {
        log::error!("render failed: {e:?}");
    }
}

fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.alert_with_message(message) {
        log::error!("alert failed: {e:?}");
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    Date::now() as u64
}
