//! Single-slot lifecycle callbacks.
//!
//! One slot per event kind, owned by the shell and living as long as it
//! does. Registering a callback for an event replaces the previous one —
//! there is no fan-out. All slots are invoked on the loop thread.

/// Typed callback table for the three lifecycle events.
#[derive(Default)]
pub struct CallbackTable {
    document_loaded: Option<Box<dyn FnMut()>>,
    script_finished: Option<Box<dyn FnMut(serde_json::Value)>>,
    closed: Option<Box<dyn FnMut()>>,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the document-loaded callback, replacing any prior one.
    pub fn set_document_loaded(&mut self, callback: impl FnMut() + 'static) {
        self.document_loaded = Some(Box::new(callback));
    }

    /// Register the script-finished callback, replacing any prior one.
    pub fn set_script_finished(&mut self, callback: impl FnMut(serde_json::Value) + 'static) {
        self.script_finished = Some(Box::new(callback));
    }

    /// Register the close callback, replacing any prior one.
    pub fn set_closed(&mut self, callback: impl FnMut() + 'static) {
        self.closed = Some(Box::new(callback));
    }

    /// Invoke the document-loaded callback, if registered.
    pub fn document_loaded(&mut self) {
        if let Some(cb) = self.document_loaded.as_mut() {
            cb();
        }
    }

    /// Invoke the script-finished callback with the script's result value.
    pub fn script_finished(&mut self, value: serde_json::Value) {
        if let Some(cb) = self.script_finished.as_mut() {
            cb(value);
        }
    }

    /// Invoke the close callback, if registered.
    pub fn closed(&mut self) {
        if let Some(cb) = self.closed.as_mut() {
            cb();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn registration_replaces_previous_callback() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut table = CallbackTable::new();

        let a = Rc::clone(&fired);
        table.set_document_loaded(move || a.borrow_mut().push("a"));
        let b = Rc::clone(&fired);
        table.set_document_loaded(move || b.borrow_mut().push("b"));

        table.document_loaded();
        assert_eq!(*fired.borrow(), vec!["b"]);
    }

    #[test]
    fn empty_slots_are_silent() {
        let mut table = CallbackTable::new();
        table.document_loaded();
        table.script_finished(serde_json::json!(null));
        table.closed();
    }

    #[test]
    fn script_callback_receives_the_value() {
        let seen = Rc::new(RefCell::new(None));
        let mut table = CallbackTable::new();

        let sink = Rc::clone(&seen);
        table.set_script_finished(move |value| *sink.borrow_mut() = Some(value));

        table.script_finished(serde_json::json!({"answer": 42}));
        assert_eq!(*seen.borrow(), Some(serde_json::json!({"answer": 42})));
    }

    #[test]
    fn callbacks_can_fire_repeatedly() {
        let count = Rc::new(RefCell::new(0));
        let mut table = CallbackTable::new();

        let c = Rc::clone(&count);
        table.set_document_loaded(move || *c.borrow_mut() += 1);

        table.document_loaded();
        table.document_loaded();
        assert_eq!(*count.borrow(), 2);
    }
}
