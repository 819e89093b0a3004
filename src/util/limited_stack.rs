use std::ops::Index;

/// Stack of the `N` most recently pushed elements.
///
/// Indexing starts at the most recent element, i.e. `stack[0]` is the last
/// pushed value and `stack[len - 1]` the oldest one still retained. Older
/// elements are overwritten once the capacity is reached.
///
/// The elements live in an inline array so `size_of<T>() * N` should stay
/// small.
#[derive(Clone, Debug)]
pub struct LimitedStack<T, const N: usize> {
    stack: [T; N],
    /// If the stack is not empty, `top` is the index of the latest element.
    top: usize,
    len: usize,
}

impl<T, const N: usize> Default for LimitedStack<T, N>
where
    T: Copy + Default,
{
    fn default() -> Self {
        Self {
            stack: [T::default(); N],
            top: N - 1,
            len: 0,
        }
    }
}

impl<T, const N: usize> LimitedStack<T, N> {
    pub fn push(&mut self, elem: T) {
        self.top = (self.top + 1) % N;
        self.stack[self.top] = elem;
        self.len += usize::from(self.len < N);
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The element pushed `idx` pushes ago.
    pub fn get(&self, idx: usize) -> Option<&T> {
        (idx < self.len).then(|| &self.stack[(self.top + N - idx) % N])
    }

    /// Iterate from the latest to the oldest element.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).filter_map(|idx| self.get(idx))
    }
}

impl<T, const N: usize> Index<usize> for LimitedStack<T, N> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(idx < self.len, "index {idx} out of bounds for length {}", self.len);

        &self.stack[(self.top + N - idx) % N]
    }
}
