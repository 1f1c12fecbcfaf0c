use std::fmt;

macro_rules! define_handle {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// The empty handle. Never refers to a live object.
            pub const NULL: Self = Self(0);

            /// Wraps a raw handle value.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw handle value.
            pub const fn raw(self) -> u64 {
                self.0
            }

            pub const fn is_null(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_null() {
                    write!(f, "{}(null)", $prefix)
                } else {
                    write!(f, "{}({})", $prefix, self.0)
                }
            }
        }
    };
}

define_handle!(
    /// One initialized connection to the graphics backend.
    InstanceId,
    "Instance"
);

define_handle!(
    /// One concrete backend/hardware implementation choice.
    AdapterId,
    "Adapter"
);

define_handle!(
    /// A platform window's drawable target, bound to an instance.
    SurfaceId,
    "Surface"
);

/// Hands out non-null handle values in increasing order.
#[derive(Debug)]
pub struct HandleAllocator {
    next: u64,
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl HandleAllocator {
    pub fn next_raw(&mut self) -> u64 {
        let raw = self.next;
        self.next += 1;
        raw
    }
}
