/// Lifecycle of one kind of fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RequestState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Monotonic request token; only the newest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

/// A request state paired with the generation of the request currently in charge of it.
#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    state: RequestState<T>,
    generation: Generation,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            generation: Generation::default(),
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Mark the slot as loading, clear any previous error and hand out a fresh token.
    pub fn begin(&mut self) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.state = RequestState::Loading;
        self.generation
    }

    /// Same as [`begin`](Self::begin), also handing back the value the slot held if it was ready.
    pub fn restart(&mut self) -> (Generation, Option<T>) {
        let previous = match std::mem::take(&mut self.state) {
            RequestState::Ready(value) => Some(value),
            _ => None,
        };
        (self.begin(), previous)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Apply a completion when its token is still current; returns whether it was applied.
    pub fn settle(&mut self, generation: Generation, outcome: Result<T, String>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = match outcome {
            Ok(value) => RequestState::Ready(value),
            Err(message) => RequestState::Failed(message),
        };
        true
    }
}
