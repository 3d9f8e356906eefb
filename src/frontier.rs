// frontier.rs
//
// Copyright (c) 2025  Douglas Lau
//
//! Frontier containers for pixel traversal
use crate::error::{Error, Result};
use crate::point::Point;
use std::collections::VecDeque;

/// Working set of points pending evaluation during a fill
pub trait Frontier {
    /// Insert one point
    fn insert(&mut self, pt: Point);

    /// Remove the next point to visit
    fn remove(&mut self) -> Result<Point>;

    /// Check if the frontier is empty
    fn is_empty(&self) -> bool;

    /// Insert the four axis neighbors of a point.
    ///
    /// The order is fixed for each container, so that points are visited
    /// right, left, down, up.
    fn insert_neighbors(&mut self, pt: Point);
}

/// First-in, first-out queue of points (breadth-first traversal)
#[derive(Debug, Default)]
pub struct Queue {
    points: VecDeque<Point>,
}

/// Last-in, first-out stack of points (depth-first traversal)
#[derive(Debug, Default)]
pub struct Stack {
    points: Vec<Point>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a point onto the back of the queue
    pub fn push_back(&mut self, pt: Point) {
        self.points.push_back(pt);
    }

    /// Pop a point from the front of the queue
    pub fn pop_front(&mut self) -> Result<Point> {
        self.points.pop_front().ok_or(Error::EmptyContainer)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the number of queued points
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

impl Frontier for Queue {
    fn insert(&mut self, pt: Point) {
        self.push_back(pt);
    }

    fn remove(&mut self) -> Result<Point> {
        self.pop_front()
    }

    fn is_empty(&self) -> bool {
        Queue::is_empty(self)
    }

    fn insert_neighbors(&mut self, pt: Point) {
        self.push_back(pt.right());
        self.push_back(pt.left());
        self.push_back(pt.down());
        self.push_back(pt.up());
    }
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a point onto the top of the stack
    pub fn push(&mut self, pt: Point) {
        self.points.push(pt);
    }

    /// Pop a point from the top of the stack
    pub fn pop(&mut self) -> Result<Point> {
        self.points.pop().ok_or(Error::EmptyContainer)
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the number of stacked points
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

impl Frontier for Stack {
    fn insert(&mut self, pt: Point) {
        self.push(pt);
    }

    fn remove(&mut self) -> Result<Point> {
        self.pop()
    }

    fn is_empty(&self) -> bool {
        Stack::is_empty(self)
    }

    fn insert_neighbors(&mut self, pt: Point) {
        // reversed, so they pop right, left, down, up
        self.push(pt.up());
        self.push(pt.down());
        self.push(pt.left());
        self.push(pt.right());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn queue_fifo() {
        let mut q = Queue::new();
        assert!(q.is_empty());
        q.push_back(Point::new(1, 1));
        q.push_back(Point::new(2, 2));
        q.push_back(Point::new(3, 3));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop_front().unwrap(), Point::new(1, 1));
        assert_eq!(q.pop_front().unwrap(), Point::new(2, 2));
        assert_eq!(q.pop_front().unwrap(), Point::new(3, 3));
        assert!(q.is_empty());
    }

    #[test]
    fn stack_lifo() {
        let mut s = Stack::new();
        assert!(s.is_empty());
        s.push(Point::new(1, 1));
        s.push(Point::new(2, 2));
        s.push(Point::new(3, 3));
        assert_eq!(s.len(), 3);
        assert_eq!(s.pop().unwrap(), Point::new(3, 3));
        assert_eq!(s.pop().unwrap(), Point::new(2, 2));
        assert_eq!(s.pop().unwrap(), Point::new(1, 1));
        assert!(s.is_empty());
    }

    #[test]
    fn empty_container() {
        assert!(matches!(Queue::new().pop_front(), Err(Error::EmptyContainer)));
        assert!(matches!(Stack::new().pop(), Err(Error::EmptyContainer)));
    }

    fn visit_order<F: Frontier>(mut f: F) -> Vec<Point> {
        f.insert_neighbors(Point::new(5, 5));
        let mut order = vec![];
        while !f.is_empty() {
            order.push(f.remove().unwrap());
        }
        order
    }

    #[test]
    fn neighbor_order() {
        let expected = vec![
            Point::new(6, 5),
            Point::new(4, 5),
            Point::new(5, 6),
            Point::new(5, 4),
        ];
        assert_eq!(visit_order(Queue::new()), expected);
        assert_eq!(visit_order(Stack::new()), expected);
    }
}
