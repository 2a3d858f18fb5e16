pub(crate) mod gpx;
pub(crate) mod trim;
