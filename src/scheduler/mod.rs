pub(crate) mod animator;
pub(crate) mod clock;
pub(crate) mod opts;
