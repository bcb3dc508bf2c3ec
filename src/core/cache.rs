/// A derived value paired with whether it still matches the inputs it was computed from.
///
/// Mutators call [`Cached::invalidate`]; readers go through [`Cached::get_or_refresh`],
/// which recomputes only when stale. A failed refresh leaves the value stale.
#[derive(Debug, Clone, Copy)]
pub struct Cached<T> {
    value: T,
    fresh: bool,
}

impl<T: Copy> Cached<T> {
    pub fn stale(initial: T) -> Self {
        Self {
            value: initial,
            fresh: false,
        }
    }

    pub fn invalidate(&mut self) {
        self.fresh = false;
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Last computed value, fresh or not.
    pub fn peek(&self) -> T {
        self.value
    }

    pub fn get_or_refresh<E, F>(&mut self, refresh: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if !self.fresh {
            self.value = refresh()?;
            self.fresh = true;
        }
        Ok(self.value)
    }
}
