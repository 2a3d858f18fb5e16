pub(crate) mod cache;
pub(crate) mod command;
pub(crate) mod provider;
pub(crate) mod sketch;
