use crate::config::{PopupOptions, TileLayer};
use crate::dlog;
use crate::types::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

/// The slippy-map widget the app draws on.
///
/// Clicks travel the other way: whoever owns the widget forwards them to
/// [`crate::app::App::show_form`].
pub trait MapView {
    fn create_map(&mut self, center: Coords, zoom: u8);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn add_marker(&mut self, at: Coords) -> MarkerId;
    fn bind_popup(&mut self, marker: MarkerId, options: &PopupOptions, content: &str);
    fn open_popup(&mut self, marker: MarkerId);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: Coords,
    pub popup: Option<(PopupOptions, String)>,
    pub open: bool,
}

/// Map that draws nothing and records what it was asked to draw.
#[derive(Debug, Default)]
pub struct TerminalMap {
    view: Option<(Coords, u8)>,
    tiles: Option<TileLayer>,
    markers: Vec<Marker>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn view(&self) -> Option<(Coords, u8)> {
        self.view
    }

    pub const fn tiles(&self) -> Option<&TileLayer> {
        self.tiles.as_ref()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl MapView for TerminalMap {
    fn create_map(&mut self, center: Coords, zoom: u8) {
        tracing::info!(lat = center.lat, lng = center.lng, zoom, "map created");
        self.view = Some((center, zoom));
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        dlog!("tile_layer url={}", layer.url_template);
        self.tiles = Some(layer.clone());
    }

    fn add_marker(&mut self, at: Coords) -> MarkerId {
        self.markers.push(Marker {
            at,
            popup: None,
            open: false,
        });
        let id = MarkerId(self.markers.len() - 1);
        tracing::info!(marker = id.0, lat = at.lat, lng = at.lng, "marker placed");
        id
    }

    fn bind_popup(&mut self, marker: MarkerId, options: &PopupOptions, content: &str) {
        let Some(m) = self.markers.get_mut(marker.0) else {
            tracing::warn!(marker = marker.0, "bind_popup on unknown marker");
            return;
        };
        m.popup = Some((options.clone(), content.to_string()));
    }

    fn open_popup(&mut self, marker: MarkerId) {
        let Some(m) = self.markers.get_mut(marker.0) else {
            tracing::warn!(marker = marker.0, "open_popup on unknown marker");
            return;
        };
        m.open = true;
        if let Some((_, content)) = &m.popup {
            dlog!("popup_open marker={} content={content}", marker.0);
        }
    }
}

pub fn google_maps_link(at: Coords) -> String {
    format!("https://www.google.com/maps/@{},{},13z", at.lat, at.lng)
}
