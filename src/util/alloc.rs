use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

/// A value which counts how many times it, or any of its clones, has been dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }

    /// Returns the number of drops recorded so far, resetting the counter.
    pub fn take(&self) -> usize {
        self.0.take()
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}
