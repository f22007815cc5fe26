use std::sync::Arc;

use crate::shared::geo::Coordinate;

/// Index into the model's text table.
pub type TextId = u32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Metro,
    Tram,
    Bus,
    Train,
    WaterBus,
    #[default]
    Default,
}

impl TransportType {
    const NATIVE_NAMES: [(&'static str, TransportType); 5] = [
        ("метро", TransportType::Metro),
        ("трамвай", TransportType::Tram),
        ("автобус", TransportType::Bus),
        ("электричка", TransportType::Train),
        ("речной трамвай", TransportType::WaterBus),
    ];

    /// Maps the archive's native transport name onto a type, falling back to `Default`.
    pub fn from_native_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self::NATIVE_NAMES
            .iter()
            .find(|(native, _)| *native == name)
            .map(|(_, kind)| *kind)
            .unwrap_or_default()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportType::Metro => "metro",
            TransportType::Tram => "tram",
            TransportType::Bus => "bus",
            TransportType::Train => "train",
            TransportType::WaterBus => "water-bus",
            TransportType::Default => "default",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TransportMap {
    pub id: u32,
    pub system_name: Arc<str>,
    pub transport_type: TransportType,
}

#[derive(Debug, Default, Clone)]
pub struct TransportLine {
    pub id: u32,
    pub map_id: u32,
    pub system_name: Arc<str>,
    pub name: TextId,
    pub line_map: Option<Arc<str>>,
    pub stations: Box<[u32]>,
    /// Extra wait per delay profile.
    pub delays: Box<[Option<u32>]>,
}

impl TransportLine {
    pub fn delay_for_profile(&self, profile: usize) -> Option<u32> {
        self.delays.get(profile).copied().flatten()
    }
}

#[derive(Debug, Default, Clone)]
pub struct TransportStation {
    pub id: u32,
    pub line_id: u32,
    pub map_id: u32,
    pub system_name: Arc<str>,
    pub name: TextId,
    pub location: Option<Coordinate>,
}

#[derive(Debug, Default, Clone)]
pub struct TransportSegment {
    pub id: u32,
    pub map_id: u32,
    pub line_id: u32,
    pub from_station_id: u32,
    pub to_station_id: u32,
    /// `None` when the segment cannot be travelled.
    pub delay: Option<u32>,
    pub flags: u32,
}

impl TransportSegment {
    pub const INVISIBLE: u32 = 1;

    pub const fn is_invisible(&self) -> bool {
        self.flags & Self::INVISIBLE != 0
    }
}

#[derive(Debug, Default, Clone)]
pub struct TransportTransfer {
    pub id: u32,
    pub from_map_id: u32,
    pub from_line_id: u32,
    pub from_station_id: u32,
    pub to_map_id: u32,
    pub to_line_id: u32,
    pub to_station_id: u32,
    pub delay: Option<u32>,
    pub flags: u32,
}

impl TransportTransfer {
    pub const INVISIBLE: u32 = 1;

    pub const fn is_invisible(&self) -> bool {
        self.flags & Self::INVISIBLE != 0
    }

    /// Transfers without a positive delay do not connect anything.
    pub fn connects(&self) -> bool {
        self.delay.is_some_and(|delay| delay != 0)
    }
}

/// Free-text annotations attached to a station, grouped by caption.
#[derive(Debug, Default, Clone)]
pub struct StationInfo {
    pub captions: Box<[TextId]>,
    /// One list of text lines per caption.
    pub lines: Box<[Box<[TextId]>]>,
}

#[test]
fn transport_type_test() {
    assert_eq!(TransportType::from_native_name("Метро"), TransportType::Metro);
    assert_eq!(TransportType::from_native_name("ТРАМВАЙ"), TransportType::Tram);
    assert_eq!(
        TransportType::from_native_name(" Речной трамвай "),
        TransportType::WaterBus
    );
    assert_eq!(TransportType::from_native_name("Monorail"), TransportType::Default);
}
