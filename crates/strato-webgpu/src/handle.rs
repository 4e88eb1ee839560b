//! Handle-to-object arena.
//!
//! Handles are allocated by native code; the bridge only binds host objects to
//! them. Misuse (unknown handle, double insert, use before an asynchronous
//! creation has bound the slot) is a contract violation between the native
//! driver and this bridge, so every such path panics instead of recovering.

use strato_webgpu_abi::{RawHandle, NULL_HANDLE};

use std::collections::HashMap;

enum Slot<T> {
    /// Pre-allocated by native code; the object arrives when the host
    /// operation settles.
    Reserved,
    Bound(T),
}

pub struct HandleTable<T> {
    kind: &'static str,
    slots: HashMap<RawHandle, Slot<T>>,
}

impl<T> HandleTable<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            slots: HashMap::new(),
        }
    }

    /// Binds `value` to a fresh handle.
    pub fn insert(&mut self, handle: RawHandle, value: T) {
        self.check_handle(handle);
        let prev = self.slots.insert(handle, Slot::Bound(value));
        assert!(
            prev.is_none(),
            "{} handle {handle} inserted while already live",
            self.kind
        );
        tracing::trace!(kind = self.kind, handle, "handle bound");
    }

    /// Parks an empty slot so the handle is valid before its asynchronous
    /// creation settles.
    pub fn reserve(&mut self, handle: RawHandle) {
        self.check_handle(handle);
        let prev = self.slots.insert(handle, Slot::Reserved);
        assert!(
            prev.is_none(),
            "{} handle {handle} reserved while already live",
            self.kind
        );
        tracing::trace!(kind = self.kind, handle, "handle reserved");
    }

    /// Fills a previously reserved slot.
    pub fn bind(&mut self, handle: RawHandle, value: T) {
        match self.slots.get_mut(&handle) {
            Some(slot @ Slot::Reserved) => *slot = Slot::Bound(value),
            Some(Slot::Bound(_)) => {
                panic!("{} handle {handle} bound twice", self.kind)
            }
            None => panic!("{} handle {handle} bound without a reservation", self.kind),
        }
        tracing::trace!(kind = self.kind, handle, "reserved handle bound");
    }

    pub fn get(&self, handle: RawHandle) -> &T {
        match self.slots.get(&handle) {
            Some(Slot::Bound(value)) => value,
            Some(Slot::Reserved) => panic!(
                "{} handle {handle} used before its creation completed",
                self.kind
            ),
            None => panic!("unknown {} handle {handle}", self.kind),
        }
    }

    pub fn get_mut(&mut self, handle: RawHandle) -> &mut T {
        match self.slots.get_mut(&handle) {
            Some(Slot::Bound(value)) => value,
            Some(Slot::Reserved) => panic!(
                "{} handle {handle} used before its creation completed",
                self.kind
            ),
            None => panic!("unknown {} handle {handle}", self.kind),
        }
    }

    /// Removes a handle. Returns `None` when the slot was still reserved
    /// (the asynchronous creation failed or never settled).
    pub fn remove(&mut self, handle: RawHandle) -> Option<T> {
        match self.slots.remove(&handle) {
            Some(Slot::Bound(value)) => {
                tracing::trace!(kind = self.kind, handle, "handle removed");
                Some(value)
            }
            Some(Slot::Reserved) => None,
            None => panic!("unknown {} handle {handle} removed", self.kind),
        }
    }

    pub fn contains(&self, handle: RawHandle) -> bool {
        matches!(self.slots.get(&handle), Some(Slot::Bound(_)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check_handle(&self, handle: RawHandle) {
        assert_ne!(
            handle, NULL_HANDLE,
            "null handle passed as a fresh {} handle",
            self.kind
        );
    }
}
