use crate::{
    assets::OutputHandle,
    core::geo::LatLng,
    input::{
        events::{Command, Request},
        parse::parse_coordinates,
    },
    locator::{MapLocator, Placement},
};
use std::sync::Arc;

pub const GREETING: &str = "Hi!";

pub const HELP_TEXT: &str = "Send me your location and I will show it on the map. Also you can \
type your coordinates in decimal degrees copied from Google Maps. Example: 60.21662, 29.75197\n\n\
To see the map without your location use /map.";

pub const OUTSIDE_TEXT: &str = "Coordinates you sent are outside of the map.";

pub const FAILURE_TEXT: &str = "Sorry, something went wrong while drawing the map. Please try again.";

/// What a front-end should send back
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    /// Marked map stored in the locator's asset store
    Photo(OutputHandle),
    /// Encoded bytes of the plain map
    MapImage(Vec<u8>),
    /// Several replies, in order
    Many(Vec<Reply>),
}

impl Reply {
    fn text(text: &str) -> Self {
        Reply::Text(text.to_string())
    }

    /// Nothing to send
    pub fn none() -> Self {
        Reply::Many(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Reply::Many(replies) if replies.iter().all(Reply::is_empty))
    }

    /// Flatten nested replies into delivery order
    pub fn into_vec(self) -> Vec<Reply> {
        match self {
            Reply::Many(replies) => replies.into_iter().flat_map(Reply::into_vec).collect(),
            other => vec![other],
        }
    }
}

/// Turns requests into replies. Transport-agnostic; cheap to clone.
#[derive(Clone)]
pub struct RequestHandler {
    locator: Arc<MapLocator>,
}

impl RequestHandler {
    pub fn new(locator: Arc<MapLocator>) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &MapLocator {
        &self.locator
    }

    pub fn handle(&self, request: &Request) -> Reply {
        match request {
            Request::Command(Command::Start) => {
                Reply::Many(vec![Reply::text(GREETING), Reply::text(HELP_TEXT)])
            }
            Request::Command(Command::Help) => Reply::text(HELP_TEXT),
            Request::Command(Command::Map) => match self.locator.map_bytes() {
                Ok(bytes) => Reply::MapImage(bytes),
                Err(e) => {
                    log::error!("cannot read base map: {}", e);
                    Reply::text(FAILURE_TEXT)
                }
            },
            Request::UnknownCommand(command) => {
                log::debug!("ignoring unknown command {}", command);
                Reply::none()
            }
            Request::Text(text) => match parse_coordinates(text) {
                Ok(lat_lng) => self.place(lat_lng),
                Err(e) => {
                    log::debug!("unparseable message {:?}: {}", text, e);
                    Reply::text(HELP_TEXT)
                }
            },
            Request::Location(lat_lng) => self.place(*lat_lng),
        }
    }

    fn place(&self, lat_lng: LatLng) -> Reply {
        match self.locator.place(lat_lng) {
            Ok(Placement::OnMap { handle, .. }) => Reply::Photo(handle),
            Ok(Placement::OffMap(point)) => {
                log::info!(
                    "({}, {}) is outside the map at ({:.3}, {:.3})",
                    lat_lng.lat,
                    lat_lng.lng,
                    point.u,
                    point.v
                );
                Reply::text(OUTSIDE_TEXT)
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("failed to place ({}, {}): {}", lat_lng.lat, lat_lng.lng, e);
                Reply::text(FAILURE_TEXT)
            }
            Err(e) => {
                log::error!("failed to place ({}, {}): {}", lat_lng.lat, lat_lng.lng, e);
                Reply::text(FAILURE_TEXT)
            }
        }
    }
}
