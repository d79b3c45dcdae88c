// Owned handle around a self-rescheduling requestAnimationFrame callback.
// The loop keeps running until `stop()` is called or the handle is dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameLoop {
    window: Window,
    request_id: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start<F>(window: Window, mut tick: F) -> Result<FrameLoop, JsValue>
    where
        F: FnMut() + 'static,
    {
        let request_id = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        // The closure needs a handle to itself to ask for the next frame
        let next_frame = callback.clone();
        let next_id = request_id.clone();
        let frame_window = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            next_id.set(None);
            tick();
            if let Some(cb) = next_frame.borrow().as_ref() {
                match frame_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => next_id.set(Some(id)),
                    Err(err) => {
                        crate::log!("failed to schedule next frame: {:?}", err);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        let first_id = match callback.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        request_id.set(Some(first_id));

        Ok(FrameLoop {
            window,
            request_id,
            callback,
        })
    }

    // A frame is pending. Goes false after `stop()` or when the next frame
    // could not be scheduled.
    pub fn is_running(&self) -> bool {
        self.request_id.get().is_some()
    }

    // Cancels the pending frame and releases the callback. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(id) = self.request_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                crate::log!("failed to cancel frame {}: {:?}", id, err);
            }
        }
        // breaks the callback's reference cycle to itself
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
