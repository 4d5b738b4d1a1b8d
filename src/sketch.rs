pub(crate) mod assemble;
pub(crate) mod header;
pub(crate) mod scaffold;
pub(crate) mod template;
