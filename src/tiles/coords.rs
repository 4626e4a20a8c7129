use std::f64::consts::PI;

/// Zoom level every request is served at.
pub const ZOOM: u8 = 18;

pub const DEFAULT_LATITUDE: f64 = 52.237;
pub const DEFAULT_LONGITUDE: f64 = 21.017;

/// Web Mercator cannot represent latitudes past this.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses optional query values, falling back per axis to the defaults.
    pub fn from_query(latitude: Option<&str>, longitude: Option<&str>) -> Self {
        Self {
            latitude: parse_or(latitude, DEFAULT_LATITUDE),
            longitude: parse_or(longitude, DEFAULT_LONGITUDE),
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

fn parse_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl Tile {
    /// Fills the `{z}`, `{y}` and `{x}` placeholders of a tile server template.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.zoom.to_string())
            .replace("{y}", &self.y.to_string())
            .replace("{x}", &self.x.to_string())
    }
}

/// Slippy-map tile containing `coordinate` at `zoom`.
pub fn point_to_tile(coordinate: Coordinate, zoom: u8) -> Tile {
    let n = 2f64.powi(i32::from(zoom));
    let max_index = n - 1.0;

    let x = (n * (coordinate.longitude / 360.0 + 0.5)).rem_euclid(n);

    let latitude = coordinate.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = (latitude * PI / 180.0).sin();
    let y = n * (0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI);

    Tile {
        x: x.floor().clamp(0.0, max_index) as u32,
        y: y.floor().clamp(0.0, max_index) as u32,
        zoom,
    }
}
