pub(crate) mod capability;
pub(crate) mod targets;
pub(crate) mod widgets;
