use serde::{Deserialize, Serialize};

/// Display duration attached to every published post.
pub const SECONDS_TO_SHOW_FOR: u32 = 16000;
/// `radius` query parameter sent with every post.
pub const RADIUS: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub latitude: i32,
    pub longitude: i32,
}

impl Location {
    /// GeoJSON order: longitude first.
    pub fn coordinates(&self) -> [i32; 2] {
        [self.longitude, self.latitude]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loc {
    pub coordinates: [i32; 2],
}

/// JSON body of `POST /api/post`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    pub seconds_to_show_for: u32,
    pub loc: Loc,
}

impl PostPayload {
    pub fn new(title: String, body: String, location: Location) -> Self {
        PostPayload {
            title,
            body,
            seconds_to_show_for: SECONDS_TO_SHOW_FOR,
            loc: Loc {
                coordinates: location.coordinates(),
            },
        }
    }
}

/// Query string of `POST /api/post`; field order is the wire order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostQuery {
    pub latitude: i32,
    pub longitude: i32,
    pub radius: u32,
}

impl From<Location> for PostQuery {
    fn from(location: Location) -> Self {
        PostQuery {
            latitude: location.latitude,
            longitude: location.longitude,
            radius: RADIUS,
        }
    }
}
