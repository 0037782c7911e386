pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod sprite;
pub(crate) mod surface;
pub(crate) mod text;
