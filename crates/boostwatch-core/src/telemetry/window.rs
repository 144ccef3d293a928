use std::collections::VecDeque;

/// Fixed-capacity sliding window over recent speed samples.
///
/// Insertion-ordered with FIFO eviction; the length never exceeds the
/// capacity. The mean of an empty window is defined as 0.0, matching the
/// display's pre-first-sample state.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting from the front once over capacity.
    pub fn push(&mut self, value: f32) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Arithmetic mean of the current contents; 0.0 when empty.
    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    /// Change the capacity, evicting oldest samples immediately if the
    /// current contents no longer fit. Growing pads nothing.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
