use std::sync::Arc;

use crate::shared::{Color, Point, Rect, Spline};

/// Presentation overlay of one view entry. Every element refers back to model entities by id.
#[derive(Debug, Default, Clone)]
pub struct MapView {
    pub id: u32,
    pub system_name: Arc<str>,
    pub background: Option<Arc<str>>,
    pub station_diameter: i32,
    pub line_width: i32,
    pub upper_case: bool,
    pub word_wrap: bool,
    pub vector: bool,
    /// Map ids this view can show.
    pub transports: Box<[u32]>,
    /// Map ids enabled by default.
    pub transports_checked: Box<[u32]>,
    pub width: i32,
    pub height: i32,
    pub lines: Box<[LineView]>,
    pub stations: Box<[StationView]>,
    pub segments: Box<[SegmentView]>,
    pub transfers: Box<[TransferView]>,
}

impl MapView {
    pub fn station_view(&self, station_id: u32) -> Option<&StationView> {
        self.stations
            .iter()
            .find(|view| view.station_id == station_id)
    }
}

#[derive(Debug, Default, Clone)]
pub struct LineView {
    pub id: u32,
    pub line_id: u32,
    pub line_color: Color,
    pub label_color: Color,
    pub name_rect: Option<Rect>,
}

#[derive(Debug, Default, Clone)]
pub struct StationView {
    pub id: u32,
    pub line_view_id: u32,
    pub station_id: u32,
    pub point: Point,
    pub name_rect: Option<Rect>,
    pub height: Option<i32>,
}

#[derive(Debug, Default, Clone)]
pub struct SegmentView {
    pub id: u32,
    pub line_view_id: u32,
    pub segment_id: u32,
    pub from_station_view_id: u32,
    pub to_station_view_id: u32,
    pub spline: Option<Spline>,
}

#[derive(Debug, Default, Clone)]
pub struct TransferView {
    pub id: u32,
    pub transfer_id: u32,
    pub from_station_view_id: u32,
    pub to_station_view_id: u32,
}
