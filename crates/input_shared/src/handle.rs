// crates/input_shared/src/handle.rs
use std::fmt;

// A unique identifier for a native input object.
// Bits 0-31: Index (The slot in the allocator)
// Bits 32-63: Generation (The version of this slot)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    id: u64,
}

impl Handle {
    const INDEX_MASK: u64 = 0xFFFFFFFF;
    const GENERATION_SHIFT: u64 = 32;

    pub fn new(index: u32, generation: u32) -> Self {
        let id = (index as u64) | ((generation as u64) << Self::GENERATION_SHIFT);
        Self { id }
    }

    pub fn index(&self) -> usize {
        (self.id & Self::INDEX_MASK) as usize
    }

    pub fn generation(&self) -> u32 {
        (self.id >> Self::GENERATION_SHIFT) as u32
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{})", self.index(), self.generation())
    }
}

macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub struct $name(pub Handle);

        impl $name {
            pub fn raw(self) -> Handle {
                self.0
            }
        }
    };
}

typed_handle!(
    /// Engine-side input context object.
    ContextHandle
);
typed_handle!(
    /// Engine-side action object.
    ActionHandle
);
typed_handle!(
    /// Engine-side binding object.
    BindingHandle
);

/// Hands out handles and recycles freed slots.
///
/// Freeing a slot bumps its generation, so a handle that outlived its object
/// never compares equal to whatever later reuses the slot.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    free_indices: Vec<u32>,
    generations: Vec<u32>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Handle {
        let index = if let Some(idx) = self.free_indices.pop() {
            idx
        } else {
            self.generations.push(0);
            (self.generations.len() - 1) as u32
        };

        Handle::new(index, self.generations[index as usize])
    }

    /// Returns false if the handle was already stale.
    pub fn free(&mut self, handle: Handle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        let index = handle.index();
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_indices.push(index as u32);
        true
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        self.generations
            .get(handle.index())
            .is_some_and(|&generation| generation == handle.generation())
    }

    /// Number of handles currently allocated.
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free_indices.len()
    }
}
