/// Owns clean-up callbacks and runs them once, most recently
/// acquired first.
#[derive(Default)]
pub struct Teardown {
    disposers: Vec<Box<dyn FnOnce() + Send>>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the disposer for a freshly acquired resource.
    pub fn push<F>(&mut self, disposer: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.disposers.push(Box::new(disposer));
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Runs every pending disposer in reverse acquisition order.
    pub fn dispose(&mut self) {
        while let Some(disposer) = self.disposers.pop() {
            disposer();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("pending", &self.disposers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Teardown;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_reverse_order_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut teardown = Teardown::new();
        for name in ["layer", "session", "watcher"] {
            let log = log.clone();
            teardown.push(move || log.lock().unwrap().push(name));
        }
        assert_eq!(teardown.len(), 3);

        teardown.dispose();
        teardown.dispose();
        drop(teardown);
        assert_eq!(*log.lock().unwrap(), vec!["watcher", "session", "layer"]);
    }

    #[test]
    fn test_drop_disposes() {
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let mut teardown = Teardown::new();
            let log = log.clone();
            teardown.push(move || log.lock().unwrap().push(1));
        }
        assert_eq!(*log.lock().unwrap(), vec![1]);
    }
}
