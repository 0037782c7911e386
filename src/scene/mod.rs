pub(crate) mod config;
pub(crate) mod decor;
pub(crate) mod particle;
pub(crate) mod snow;
pub(crate) mod trail;
pub(crate) mod trigger;
