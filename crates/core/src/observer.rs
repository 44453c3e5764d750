/// Receives the events of a run and may steer it.
///
/// A run calls [`observe`](Observer::observe) with each event it emits; a
/// returned `Some(action)` is handed back to the run, and `None` lets it
/// continue. The event and action types belong to the run loop.
///
/// Closures taking `&E` and returning `Option<A>` are observers, and `()`
/// observes nothing.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let mut observer = |event: &usize| -> Option<bool> {
            seen.push(*event);
            (*event == 2).then_some(true)
        };

        assert_eq!(observer.observe(&1), None);
        assert_eq!(observer.observe(&2), Some(true));
        assert_eq!(seen, [1, 2]);
    }

    #[test]
    fn unit_observer_never_acts() {
        let mut observer = ();
        assert_eq!(Observer::<usize, bool>::observe(&mut observer, &7), None);
    }
}
