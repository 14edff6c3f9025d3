use std::cell::RefCell;
use std::rc::Rc;

/// Destination for the transient messages shown to the user.
pub trait Notifier {
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Sends toasts through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Prints toasts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Keeps every toast in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    errors: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
