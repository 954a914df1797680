//! Browser frontend
//!
//! DOM text for score and lives, a 2D canvas for the sprites, Web Audio for
//! sound, and a `setInterval` pump that feeds `performance.now()` into the
//! engine. Expects a `<div id="app">` in the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

use super::Frontend;
use crate::audio::AudioManager;
use crate::engine::Engine;
use crate::settings::Settings;
use crate::sim::{GameState, SoundEffect};

/// How often the pump polls the engine; finer than the tick so debounce
/// deadlines land close to on time
const PUMP_INTERVAL_MS: i32 = 5;

/// DOM-backed displays, audio and game-over notice
pub struct WebFrontend {
    score_el: HtmlElement,
    life_el: HtmlElement,
    game_over_el: HtmlElement,
    audio: AudioManager,
}

impl Frontend for WebFrontend {
    fn score_text(&mut self, text: &str) {
        self.score_el.set_text_content(Some(text));
    }

    fn life_text(&mut self, text: &str) {
        self.life_el.set_text_content(Some(text));
    }

    fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
        self.audio.play(effect)
    }

    fn game_over(&mut self) {
        show(&self.game_over_el, true);
    }
}

fn show(el: &HtmlElement, visible: bool) {
    let _ = el
        .style()
        .set_property("display", if visible { "block" } else { "none" });
}

fn create(document: &Document, tag: &str, css: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    el.style().set_css_text(css);
    Ok(el)
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn draw(ctx: &CanvasRenderingContext2d, state: &GameState) {
    let s = &state.settings;
    ctx.set_fill_style_str("#1b1b2f");
    ctx.fill_rect(0.0, 0.0, s.game_width as f64, s.game_height as f64);

    ctx.set_fill_style_str("#e94560");
    for e in &state.enemies {
        ctx.fill_rect(e.pos.x as f64, e.pos.y as f64, e.size.x as f64, e.size.y as f64);
    }
    ctx.set_fill_style_str("#f6c90e");
    for b in &state.bonuses {
        ctx.fill_rect(b.pos.x as f64, b.pos.y as f64, b.size.x as f64, b.size.y as f64);
    }
    let p = &state.player;
    ctx.set_fill_style_str("#c68642");
    ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size.x as f64, p.size.y as f64);
}

/// Build the page, wire input and start pumping
pub fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let root = document
        .get_element_by_id("app")
        .ok_or("missing #app element")?;

    let settings = Settings::default();
    root.set_attribute(
        "style",
        &format!(
            "position: relative; width: {}px; height: {}px;",
            settings.game_width, settings.game_height
        ),
    )?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(settings.game_width as u32);
    canvas.set_height(settings.game_height as u32);
    root.append_child(&canvas)?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or("no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let ctx = Rc::new(ctx);

    let text_css = "position: absolute; color: white; font: bold 24px monospace;";
    let score_el = create(&document, "div", &format!("{text_css} left: 20px; bottom: 10px;"))?;
    let life_el = create(&document, "div", &format!("{text_css} right: 20px; bottom: 10px;"))?;
    let button_css = "position: absolute; top: 300px; left: 112px; width: 300px; height: 100px; \
                      border: none; font: bold 40px monospace; z-index: 500;";
    let start_el = create(&document, "button", &format!("{button_css} background: yellow;"))?;
    start_el.set_text_content(Some("Start"));
    let game_over_el = create(&document, "button", &format!("{button_css} background: red;"))?;
    game_over_el.set_text_content(Some("GAME OVER"));
    show(&game_over_el, false);
    for el in [&score_el, &life_el, &start_el, &game_over_el] {
        root.append_child(el)?;
    }

    let frontend = WebFrontend {
        score_el,
        life_el,
        game_over_el: game_over_el.clone(),
        audio: AudioManager::new(),
    };
    let seed = js_sys::Date::now() as u64;
    let engine = Engine::new(settings, seed, frontend)
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    let engine = Rc::new(RefCell::new(engine));
    draw(&ctx, engine.borrow().state());

    // Start
    {
        let engine = engine.clone();
        let start = start_el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut e = engine.borrow_mut();
            e.frontend_mut().audio.resume();
            e.start(now_ms());
            show(&start, false);
        });
        start_el.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Game over acknowledged: fresh game behind the start button
    {
        let engine = engine.clone();
        let ctx = ctx.clone();
        let notice = game_over_el.clone();
        let start = start_el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut e = engine.borrow_mut();
            if e.acknowledge_game_over() {
                draw(&ctx, e.state());
                show(&notice, false);
                show(&start, true);
            }
        });
        game_over_el.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard
    {
        let engine = engine.clone();
        let muted = Rc::new(RefCell::new(false));
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut e = engine.borrow_mut();
            match event.code().as_str() {
                "ArrowLeft" => e.move_left(),
                "ArrowRight" => e.move_right(),
                "KeyM" => {
                    let mut m = muted.borrow_mut();
                    *m = !*m;
                    e.frontend_mut().audio.set_muted(*m);
                }
                _ => {}
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pump
    {
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut e = engine.borrow_mut();
            if e.advance(now_ms()) > 0 {
                draw(&ctx, e.state());
            }
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            PUMP_INTERVAL_MS,
        )?;
        closure.forget();
    }

    log::info!("Burger Dash ready");
    Ok(())
}
