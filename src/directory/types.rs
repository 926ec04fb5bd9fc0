use serde::Deserialize;

/// Fixed span used for the bootstrap viewport. Later spans come verbatim
/// from map-view settle events.
pub const DEFAULT_VIEWPORT_SPAN: f64 = 0.04;

/// The currently visible map region: a center coordinate plus the
/// latitude/longitude spans covered by the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

impl Viewport {
    /// Initial viewport derived from a device position: centered on it,
    /// with the fixed bootstrap spans.
    pub fn centered_on(position: Position) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
            latitude_span: DEFAULT_VIEWPORT_SPAN,
            longitude_span: DEFAULT_VIEWPORT_SPAN,
        }
    }
}

/// A one-shot device position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One directory record: a nearby developer profile and its map coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Dev {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    /// Ordered as returned by the service.
    pub techs: Vec<String>,
    pub avatar_url: String,
    pub github_username: String,
    pub latitude: f64,
    pub longitude: f64,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Wire shape of one element of the `/devs` response array.
#[derive(Deserialize, Debug)]
pub struct DevRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    pub techs: Vec<String>,
    pub avatar_url: String,
    pub github_username: String,
    pub location: GeoJsonPoint,
}

/// GeoJSON point. Coordinates are `[longitude, latitude]`, reversed versus
/// the client's (lat, lon) convention.
#[derive(Deserialize, Debug)]
pub struct GeoJsonPoint {
    pub coordinates: [f64; 2],
}

impl From<DevRecord> for Dev {
    fn from(record: DevRecord) -> Self {
        let [longitude, latitude] = record.location.coordinates;
        Dev {
            id: record.id,
            name: record.name,
            bio: record.bio,
            techs: record.techs,
            avatar_url: record.avatar_url,
            github_username: record.github_username,
            latitude,
            longitude,
        }
    }
}
