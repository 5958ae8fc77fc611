//! Scratch space for layer reductions.
use super::Node;
use crate::lib::*;

/// Hands out a mutable run of roots of a requested size.
///
/// Contents of the returned slice are unspecified; callers overwrite every entry they read.
pub trait Buffer: Default {
    fn get(&mut self, size: usize) -> &mut [Node];
}

/// Grows on demand and keeps its allocation across calls.
///
/// Owned by a single hasher; `&mut` access keeps it from being shared between concurrent callers.
#[derive(Debug, Default)]
pub struct ReusableBuffer {
    buf: Vec<Node>,
}

impl Buffer for ReusableBuffer {
    fn get(&mut self, size: usize) -> &mut [Node] {
        if self.buf.len() < size {
            self.buf.resize(size, Node::ZERO);
        }
        &mut self.buf[..size]
    }
}

impl ReusableBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

/// Allocates a fresh zeroed run on every call.
#[derive(Debug, Default)]
pub struct SingleUseBuffer {
    buf: Vec<Node>,
}

impl Buffer for SingleUseBuffer {
    fn get(&mut self, size: usize) -> &mut [Node] {
        self.buf = vec![Node::ZERO; size];
        &mut self.buf
    }
}
