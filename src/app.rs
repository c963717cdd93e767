//! Browser entry point: logger setup, DOM event wiring, and the handle the
//! page script talks to.
//!
//! Page chrome (login form, roll popup, player list) is plain HTML owned by
//! the page. It drives the client through [`TabletopClient`] and polls the
//! JSON views for display.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use canvas::engine::{Action, Engine};
use canvas::input::{Button, Key, Modifiers, Tool, WheelDelta};
use canvas::viewport::Point;
use protocol::Outbound;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    DragEvent, Event, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Touch, TouchEvent, TouchList,
    WheelEvent,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::channel::{self, Channel};
use crate::net::{api, emit};
use crate::pointer::{TouchTrack, mouse_button};
use crate::render_loop;
use crate::state::session::{ConnectionStatus, Session};
use crate::util::cookie;

/// Install the panic hook and console logger.
///
/// # Errors
///
/// Returns `Err` if a logger was already installed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(to_js)?;
    Ok(())
}

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

struct App {
    session: Rc<RefCell<Session>>,
    engine: Rc<RefCell<Engine>>,
    canvas: HtmlCanvasElement,
    channel: RefCell<Option<Channel>>,
    touch: RefCell<TouchTrack>,
}

impl App {
    /// Send what needs sending and apply cursor changes.
    fn perform(&self, actions: Vec<Action>) {
        for action in actions {
            if let Action::SetCursor(cursor) = action {
                if self.canvas.style().set_property("cursor", cursor).is_err() {
                    log::debug!("could not set cursor {cursor}");
                }
                continue;
            }
            if let Some(msg) = emit::action_to_outbound(&action) {
                self.send(&msg);
            }
        }
    }

    fn send(&self, msg: &Outbound) {
        let sent = self.channel.borrow().as_ref().is_some_and(|ch| ch.send(msg));
        if !sent {
            log::warn!("not connected; dropped {msg:?}");
        }
    }

    fn canvas_point(&self, client_x: i32, client_y: i32) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
    }

    fn game(&self) -> Option<String> {
        self.session.borrow().local.as_ref().map(|p| p.game.clone())
    }
}

fn mouse_modifiers(ev: &MouseEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

fn key_modifiers(ev: &KeyboardEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

fn touch_modifiers(ev: &TouchEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

/// The changed touch belonging to the tracked finger, if it moved or lifted.
fn tracked_touch(list: &TouchList, track: &TouchTrack) -> Option<Touch> {
    (0..list.length()).filter_map(|i| list.get(i)).find(|t| track.follows(t.identifier()))
}

fn is_text_field(target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
}

fn listen<E>(target: &EventTarget, name: &str, mut handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
where
    E: JsCast + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    });
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_listeners(app: &Rc<App>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let canvas: &EventTarget = app.canvas.as_ref();

    let a = Rc::clone(app);
    listen(canvas, "mousedown", move |ev: MouseEvent| {
        let Some(button) = mouse_button(ev.button()) else {
            return;
        };
        if button == Button::Middle {
            ev.prevent_default();
        }
        let pt = a.canvas_point(ev.client_x(), ev.client_y());
        let actions = {
            let engine = a.engine.borrow();
            let probe = engine.probe();
            a.session.borrow_mut().engine.on_pointer_down(pt, button, mouse_modifiers(&ev), &probe)
        };
        a.perform(actions);
    })?;

    let a = Rc::clone(app);
    listen(&window, "mousemove", move |ev: MouseEvent| {
        let pt = a.canvas_point(ev.client_x(), ev.client_y());
        let actions = a.session.borrow_mut().engine.on_pointer_move(pt, mouse_modifiers(&ev));
        a.perform(actions);
    })?;

    let a = Rc::clone(app);
    listen(&window, "mouseup", move |ev: MouseEvent| {
        let Some(button) = mouse_button(ev.button()) else {
            return;
        };
        let pt = a.canvas_point(ev.client_x(), ev.client_y());
        let actions = a.session.borrow_mut().engine.on_pointer_up(pt, button, mouse_modifiers(&ev));
        a.perform(actions);
    })?;

    let a = Rc::clone(app);
    listen(canvas, "wheel", move |ev: WheelEvent| {
        ev.prevent_default();
        let pt = a.canvas_point(ev.client_x(), ev.client_y());
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        let actions = a.session.borrow_mut().engine.on_wheel(pt, delta, mouse_modifiers(&ev));
        a.perform(actions);
    })?;

    listen(canvas, "contextmenu", |ev: MouseEvent| ev.prevent_default())?;

    let a = Rc::clone(app);
    listen(&window, "keydown", move |ev: KeyboardEvent| {
        if is_text_field(ev.target()) {
            return;
        }
        let actions = a.session.borrow_mut().engine.on_key_down(&Key(ev.key()), key_modifiers(&ev));
        if !actions.is_empty() {
            ev.prevent_default();
        }
        a.perform(actions);
    })?;

    let a = Rc::clone(app);
    listen(canvas, "touchstart", move |ev: TouchEvent| {
        let Some(touch) = ev.changed_touches().get(0) else {
            return;
        };
        if !a.touch.borrow_mut().start(touch.identifier(), ev.touches().length()) {
            return;
        }
        // Suppresses the emulated mouse events and page scrolling.
        ev.prevent_default();
        let pt = a.canvas_point(touch.client_x(), touch.client_y());
        let actions = {
            let engine = a.engine.borrow();
            let probe = engine.probe();
            a.session.borrow_mut().engine.on_pointer_down(pt, Button::Primary, touch_modifiers(&ev), &probe)
        };
        a.perform(actions);
    })?;

    let a = Rc::clone(app);
    listen(canvas, "touchmove", move |ev: TouchEvent| {
        let Some(touch) = tracked_touch(&ev.changed_touches(), &a.touch.borrow()) else {
            return;
        };
        ev.prevent_default();
        let pt = a.canvas_point(touch.client_x(), touch.client_y());
        let actions = a.session.borrow_mut().engine.on_pointer_move(pt, touch_modifiers(&ev));
        a.perform(actions);
    })?;

    for name in ["touchend", "touchcancel"] {
        let a = Rc::clone(app);
        listen(canvas, name, move |ev: TouchEvent| {
            let Some(touch) = tracked_touch(&ev.changed_touches(), &a.touch.borrow()) else {
                return;
            };
            a.touch.borrow_mut().end(touch.identifier());
            ev.prevent_default();
            let pt = a.canvas_point(touch.client_x(), touch.client_y());
            let actions = a.session.borrow_mut().engine.on_pointer_up(pt, Button::Primary, touch_modifiers(&ev));
            a.perform(actions);
        })?;
    }

    listen(canvas, "dragover", |ev: DragEvent| ev.prevent_default())?;

    let a = Rc::clone(app);
    listen(canvas, "drop", move |ev: DragEvent| {
        ev.prevent_default();
        let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) else {
            return;
        };
        let Some(game) = a.game() else {
            return;
        };
        let pt = a.canvas_point(ev.client_x(), ev.client_y());
        let a = Rc::clone(&a);
        wasm_bindgen_futures::spawn_local(async move {
            match api::upload_images(&game, &files).await {
                Ok(urls) => {
                    let actions = a.session.borrow_mut().engine.request_create(urls, pt);
                    a.perform(actions);
                }
                Err(err) => {
                    log::warn!("upload failed: {err}");
                    a.session.borrow_mut().notice = Some(err.to_string());
                }
            }
        });
    })?;

    Ok(())
}

/// Handle the page script holds for the lifetime of the game view.
#[wasm_bindgen]
pub struct TabletopClient {
    app: Rc<App>,
}

#[wasm_bindgen]
impl TabletopClient {
    /// Bind to the canvas with id `canvas_id` and start the render loop. The
    /// canvas is fitted inside its parent element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas or its parent is missing or has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<TabletopClient, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?;
        let host = canvas
            .parent_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str("canvas has no parent element"))?;

        let session = Rc::new(RefCell::new(Session::new(ClientConfig::load())));
        let engine = Rc::new(RefCell::new(Engine::new(canvas.clone())?));
        let app = Rc::new(App {
            session: Rc::clone(&session),
            engine: Rc::clone(&engine),
            canvas,
            channel: RefCell::new(None),
            touch: RefCell::new(TouchTrack::default()),
        });
        install_listeners(&app)?;
        render_loop::start(session, engine, host);
        log::info!("tabletop client ready");
        Ok(Self { app })
    }

    /// Color saved from the last login, for pre-filling the form.
    #[wasm_bindgen(js_name = savedColor)]
    pub fn saved_color() -> Option<String> {
        cookie::load_player_color()
    }

    /// Log in and open the message channel. Resolves once the socket is opening.
    /// Rejects while a previous login is still connecting or connected.
    pub fn join(&self, game: String, name: String, color: String) -> js_sys::Promise {
        let app = Rc::clone(&self.app);
        wasm_bindgen_futures::future_to_promise(async move {
            let already_in_game = || to_js(ClientError::InvalidInput("already in a game".into()));
            if !app.session.borrow().can_login() {
                return Err(already_in_game());
            }
            let request = api::prepare_login(&game, &name, &color).map_err(to_js)?;
            let login = api::login(&request).await.map_err(|e| to_js(ClientError::from(e)))?;
            // Another join may have finished while this one awaited the reply.
            if !app.session.borrow().can_login() {
                return Err(already_in_game());
            }
            cookie::save_player_color(&login.color);
            app.session.borrow_mut().begin_login(&request.game, &login.name, &login.color);

            match channel::connect(Rc::clone(&app.session)) {
                Ok(ch) => {
                    *app.channel.borrow_mut() = Some(ch);
                    Ok(JsValue::UNDEFINED)
                }
                Err(err) => {
                    app.session.borrow_mut().reset_to_login(err.to_string());
                    Err(to_js(err))
                }
            }
        })
    }

    /// Roll a die with `sides` faces.
    pub fn roll(&self, sides: u32) {
        self.app.send(&emit::roll_request(sides));
    }

    /// Choose what primary-button drags on a token do: `move`, `resize` or `rotate`.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, name: &str) {
        let tool = match name {
            "resize" => Tool::Resize,
            "rotate" => Tool::Rotate,
            _ => Tool::Move,
        };
        self.app.session.borrow_mut().engine.set_tool(tool);
    }

    /// Create tokens from already-uploaded image URLs at a canvas position.
    #[wasm_bindgen(js_name = createTokens)]
    pub fn create_tokens(&self, urls: Vec<String>, x: f64, y: f64) {
        let actions = self.app.session.borrow_mut().engine.request_create(urls, Point::new(x, y));
        self.app.perform(actions);
    }

    /// Image file names available to the current game.
    #[wasm_bindgen(js_name = listImages)]
    pub fn list_images(&self) -> js_sys::Promise {
        let game = self.app.game();
        wasm_bindgen_futures::future_to_promise(async move {
            let game = game.ok_or_else(|| to_js(ClientError::InvalidInput("not in a game".into())))?;
            let files = api::list_images(&game).await.map_err(to_js)?;
            Ok(files.into_iter().map(JsValue::from).collect::<js_sys::Array>().into())
        })
    }

    /// `"logged_out"`, `"connecting"` or `"connected"`.
    pub fn status(&self) -> String {
        match self.app.session.borrow().connection {
            ConnectionStatus::LoggedOut => "logged_out",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        }
        .to_owned()
    }

    /// Pending blocking notice, cleared once read.
    #[wasm_bindgen(js_name = takeNotice)]
    pub fn take_notice(&self) -> Option<String> {
        self.app.session.borrow_mut().take_notice()
    }

    /// `{"popup": [...], "history": [...]}` for the roll display.
    #[wasm_bindgen(js_name = rollsJson)]
    pub fn rolls_json(&self) -> String {
        let session = self.app.session.borrow();
        let view = serde_json::json!({ "popup": session.rolls.popup(), "history": session.rolls.history() });
        view.to_string()
    }

    /// Connected players sorted by name.
    #[wasm_bindgen(js_name = playersJson)]
    pub fn players_json(&self) -> String {
        let session = self.app.session.borrow();
        serde_json::json!(session.roster.players()).to_string()
    }
}
