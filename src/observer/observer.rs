use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Something that caches results derived from an [`Observable`].
///
/// `update` is called synchronously by the observable whenever its state
/// changes; implementations drop their cached results and forward the
/// notification to their own observers if they have any.
pub trait Observer {
    fn update(&self);
}

/// Weak back-references from an observable to its observers.
///
/// Observers are never kept alive by the list. Dead entries are pruned on
/// every notification.
#[derive(Default)]
pub struct ObserverList {
    observers: RefCell<Vec<Weak<dyn Observer>>>,
}

impl ObserverList {
    pub fn new() -> ObserverList {
        ObserverList {
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Registering the same observer twice keeps a single entry.
    pub fn register(&self, observer: Weak<dyn Observer>) {
        let mut observers = self.observers.borrow_mut();
        if !observers.iter().any(|o| std::ptr::addr_eq(o.as_ptr(), observer.as_ptr())) {
            observers.push(observer);
        }
    }

    pub fn unregister(&self, observer: &Weak<dyn Observer>) {
        self.observers
            .borrow_mut()
            .retain(|o| !std::ptr::addr_eq(o.as_ptr(), observer.as_ptr()));
    }

    /// Number of observers still alive.
    pub fn len(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notify(&self) {
        // Upgrade first so an observer may subscribe or unsubscribe from within `update`.
        let alive: Vec<Rc<dyn Observer>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in alive {
            observer.update();
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList").field("len", &self.len()).finish()
    }
}

pub trait Observable {
    fn observers(&self) -> &ObserverList;

    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.observers().register(observer);
    }

    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.observers().unregister(observer);
    }

    fn notify_observers(&self) {
        self.observers().notify();
    }
}
