pub(crate) mod branch;
pub(crate) mod translate;
