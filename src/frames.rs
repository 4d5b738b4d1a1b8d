pub(crate) mod compositor;
pub(crate) mod disposal;
pub(crate) mod extract;
pub(crate) mod sample;
