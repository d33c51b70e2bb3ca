pub mod nominatim;

pub use nominatim::{enrich_coordinates, Nominatim};
