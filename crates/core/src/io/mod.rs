//! I/O operations for reading and writing vector layers

mod geojson_io;

pub use geojson_io::{layer_from_geojson_str, layer_to_geojson_string, read_geojson, write_geojson};
