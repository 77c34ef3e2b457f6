pub(crate) mod ease;
pub(crate) mod mode;
pub(crate) mod timing;
