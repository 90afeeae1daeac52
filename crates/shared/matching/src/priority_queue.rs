use std::cmp::Ordering;

/// Three-way priority comparison
///
/// `Ordering::Less` means `a` has higher priority than `b` and sits
/// closer to the root.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Binary min-heap over a dense vector, ordered by a comparator
///
/// The root is always the element with the highest priority. Not
/// thread-safe; callers serialize access.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, C> {
    items: Vec<T>,
    comparator: C,
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    pub fn new(comparator: C) -> Self {
        Self {
            items: Vec::new(),
            comparator,
        }
    }

    /// Append and sift up while the child strictly outranks its parent
    pub fn enqueue(&mut self, item: T) {
        self.items.push(item);

        let mut child = self.items.len() - 1;
        while child != 0 {
            let parent = (child - 1) >> 1;
            if self.higher(parent, child) == parent {
                break;
            }
            self.items.swap(parent, child);
            child = parent;
        }
    }

    /// Remove the root, moving the last element up and sifting it down
    pub fn dequeue(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let result = self.items.pop();
        self.sift_down(0);

        result
    }

    /// Restore the heap property over every item
    ///
    /// Needed after comparator state changed how stored items rank.
    pub fn rebuild(&mut self) {
        for parent in (0..self.items.len() / 2).rev() {
            self.sift_down(parent);
        }
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Backing array in heap order (not sorted beyond the heap property)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Mutable access to comparator state
    ///
    /// Changing how existing items compare does not re-heapify them; follow
    /// up with [`PriorityQueue::rebuild`].
    pub fn comparator_mut(&mut self) -> &mut C {
        &mut self.comparator
    }

    fn sift_down(&mut self, mut parent: usize) {
        loop {
            let child = (parent << 1) + 1;
            let high = self.higher(self.higher(parent, child), child + 1);
            if high == parent {
                break;
            }
            self.items.swap(parent, high);
            parent = high;
        }
    }

    /// Index of whichever of the two slots has priority; `parent` wins ties
    /// and out-of-range children
    fn higher(&self, parent: usize, child: usize) -> usize {
        if child < self.items.len()
            && self
                .comparator
                .compare(&self.items[parent], &self.items[child])
                == Ordering::Greater
        {
            child
        } else {
            parent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_queue() -> PriorityQueue<i32, impl Comparator<i32>> {
        PriorityQueue::new(|a: &i32, b: &i32| a.cmp(b))
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = min_queue();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_dequeues_in_priority_order() {
        let mut queue = min_queue();
        for value in [5, 3, 8, 1, 9, 2, 7] {
            queue.enqueue(value);
        }
        assert_eq!(queue.size(), 7);
        assert_eq!(queue.peek(), Some(&1));

        let mut drained = Vec::new();
        while let Some(value) = queue.dequeue() {
            drained.push(value);
        }
        assert_eq!(drained, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_reversed_comparator() {
        let mut queue = PriorityQueue::new(|a: &i32, b: &i32| b.cmp(a));
        for value in [4, 10, 6] {
            queue.enqueue(value);
        }
        assert_eq!(queue.dequeue(), Some(10));
        assert_eq!(queue.dequeue(), Some(6));
        assert_eq!(queue.dequeue(), Some(4));
    }

    #[test]
    fn test_items_keeps_heap_layout() {
        let mut queue = min_queue();
        queue.enqueue(2);
        queue.enqueue(1);
        queue.enqueue(3);
        // 1 sifted above 2, 3 stays a leaf
        assert_eq!(queue.items(), &[1, 2, 3]);
    }

    #[test]
    fn test_equal_items_keep_insertion_root() {
        let mut queue = PriorityQueue::new(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        queue.enqueue((1, 'a'));
        queue.enqueue((1, 'b'));
        assert_eq!(queue.peek(), Some(&(1, 'a')));
    }

    struct ClosestTo {
        target: i32,
    }

    impl Comparator<i32> for ClosestTo {
        fn compare(&self, a: &i32, b: &i32) -> Ordering {
            (a - self.target).abs().cmp(&(b - self.target).abs())
        }
    }

    #[test]
    fn test_rebuild_after_comparator_change() {
        let mut queue = PriorityQueue::new(ClosestTo { target: 0 });
        for value in [5, 1, 9, 3, 7] {
            queue.enqueue(value);
        }
        assert_eq!(queue.peek(), Some(&1));

        queue.comparator_mut().target = 10;
        // stale until rebuilt
        assert_eq!(queue.peek(), Some(&1));

        queue.rebuild();
        let mut drained = Vec::new();
        while let Some(value) = queue.dequeue() {
            drained.push(value);
        }
        assert_eq!(drained, vec![9, 7, 5, 3, 1]);
    }

    #[test]
    fn test_rebuild_empty_and_single() {
        let mut queue = min_queue();
        queue.rebuild();
        assert!(queue.is_empty());
        queue.enqueue(4);
        queue.rebuild();
        assert_eq!(queue.peek(), Some(&4));
    }

    #[test]
    fn test_interleaved_operations() {
        let mut queue = min_queue();
        queue.enqueue(4);
        queue.enqueue(2);
        assert_eq!(queue.dequeue(), Some(2));
        queue.enqueue(1);
        queue.enqueue(3);
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), Some(4));
        assert!(queue.is_empty());
    }
}
