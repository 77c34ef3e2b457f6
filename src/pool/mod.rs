pub(crate) mod descriptor;
pub(crate) mod slot_pool;
