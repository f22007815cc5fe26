use std::{
    collections::HashMap,
    io::{Read, Seek},
    mem,
    time::Instant,
};

use tracing::{debug, warn};

use super::pmz::Assembler;
use crate::{
    model::{LineView, MapView, SegmentView, StationView, TransferView},
    pmz::{
        self, Config, PmzArchive, ViewDefaults,
        directive::{Directive, DirectiveReader, SectionConsumer, drive},
        values::{
            parse_bool_or, parse_color, parse_int, parse_int_array, parse_int_or, parse_points,
            parse_rect, parse_rects, parse_string_array,
        },
    },
    shared::{Color, Point, Rect, Spline},
};

impl Assembler<'_> {
    pub(super) fn load_views<R: Read + Seek>(
        &mut self,
        archive: &mut PmzArchive<R>,
        names: &[String],
        config: &Config,
    ) -> Result<(), pmz::Error> {
        debug!("Loading views...");
        let now = Instant::now();
        for name in names {
            let text = archive.read_text(name)?;
            let view = self.make_view(name, &text, &config.view);
            self.views.push(view);
        }
        debug!("Loading views took {:?}", now.elapsed());
        Ok(())
    }

    fn make_view(&mut self, name: &str, text: &str, defaults: &ViewDefaults) -> MapView {
        let id = self.views.len() as u32;
        let mut builder = ViewBuilder {
            assembler: self,
            view: MapView {
                id,
                system_name: name.into(),
                station_diameter: defaults.station_diameter,
                line_width: defaults.line_width,
                upper_case: defaults.upper_case,
                word_wrap: defaults.word_wrap,
                vector: defaults.vector,
                ..Default::default()
            },
            line_views: Vec::new(),
            station_views: Vec::new(),
            line_view_index: HashMap::new(),
            station_view_index: HashMap::new(),
            additional_nodes: HashMap::new(),
        };
        drive(DirectiveReader::new(text), &mut builder);
        builder.finish(defaults.margin)
    }
}

/// Geometry of one line section, applied once the section ends.
struct LineViewRecord {
    line_id: u32,
    line_view: LineView,
    coordinates: Vec<Point>,
    rects: Vec<Option<Rect>>,
    heights: Vec<Option<i32>>,
}

struct ViewBuilder<'a, 'r> {
    assembler: &'a mut Assembler<'r>,
    view: MapView,
    line_views: Vec<LineView>,
    station_views: Vec<StationView>,
    /// line id -> line view id
    line_view_index: HashMap<u32, u32>,
    /// station id -> station view id
    station_view_index: HashMap<u32, u32>,
    /// (from station id, to station id) -> extra control points
    additional_nodes: HashMap<(u32, u32), Spline>,
}

impl ViewBuilder<'_, '_> {
    fn read_option(&mut self, directive: &Directive<'_>) {
        if directive.key_is("Transports") {
            self.view.transports = self.map_ids(directive.value);
            return;
        } else if directive.key_is("CheckedTransports") {
            self.view.transports_checked = self.map_ids(directive.value);
            return;
        }
        let view = &mut self.view;
        if directive.key_is("ImageFileName") {
            view.background = Some(directive.value.into());
        } else if directive.key_is("StationDiameter") {
            view.station_diameter = parse_int_or(directive.value, view.station_diameter);
        } else if directive.key_is("LinesWidth") {
            view.line_width = parse_int_or(directive.value, view.line_width);
        } else if directive.key_is("UpperCase") {
            view.upper_case = parse_bool_or(directive.value, view.upper_case);
        } else if directive.key_is("WordWrap") {
            view.word_wrap = parse_bool_or(directive.value, view.word_wrap);
        } else if directive.key_is("IsVector") {
            view.vector = parse_bool_or(directive.value, view.vector);
        }
    }

    fn map_ids(&self, value: &str) -> Box<[u32]> {
        parse_string_array(value)
            .iter()
            .filter_map(|name| self.assembler.map_index.get(name.as_str()).copied())
            .collect()
    }

    /// `line,from,to,x1,y1,...[,spline]`
    fn read_additional_node(&mut self, value: &str) {
        let parts = parse_string_array(value);
        if parts.len() < 3 {
            warn!("Dropping malformed additional node {value:?}");
            return;
        }
        let from = self.assembler.station(&parts[0], &parts[1]).map(|s| s.id);
        let to = self.assembler.station(&parts[0], &parts[2]).map(|s| s.id);
        let (Some(from), Some(to)) = (from, to) else {
            warn!("Dropping additional node {value:?}: unknown station");
            return;
        };
        let mut spline = Spline::default();
        let mut pos = 3;
        while pos < parts.len() {
            if parts[pos].to_lowercase().contains("spline") {
                spline.is_spline = true;
                break;
            }
            let x = parse_int(&parts[pos]).unwrap_or(0);
            let y = parts.get(pos + 1).and_then(|y| parse_int(y)).unwrap_or(0);
            spline.points.push(Point::new(x, y));
            pos += 2;
        }
        self.additional_nodes.insert((from, to), spline);
    }

    /// Stations with a zero position get no view.
    fn make_station_views(&mut self, record: &LineViewRecord) {
        let Some(line) = self.assembler.lines.get(record.line_id as usize) else {
            return;
        };
        let line_view_id = record.line_view.id;
        for (i, (station_id, point)) in line.stations.iter().zip(&record.coordinates).enumerate() {
            if point.is_zero() {
                continue;
            }
            let id = self.station_views.len() as u32;
            self.station_views.push(StationView {
                id,
                line_view_id,
                station_id: *station_id,
                point: *point,
                name_rect: record.rects.get(i).copied().flatten(),
                height: record.heights.get(i).copied().flatten(),
            });
            self.station_view_index.insert(*station_id, id);
        }
    }

    fn make_segment_views(&self) -> Vec<SegmentView> {
        let mut views = Vec::new();
        for segment in self.assembler.segments.iter() {
            let from = self.station_view_index.get(&segment.from_station_id);
            let to = self.station_view_index.get(&segment.to_station_id);
            let line_view = self.line_view_index.get(&segment.line_id);
            let (Some(from), Some(to), Some(line_view)) = (from, to, line_view) else {
                continue;
            };
            if segment.is_invisible() {
                continue;
            }
            let spline = self
                .additional_nodes
                .get(&(segment.from_station_id, segment.to_station_id));
            let opposite = self
                .additional_nodes
                .get(&(segment.to_station_id, segment.from_station_id));
            if spline.is_some_and(Spline::is_zero) || opposite.is_some_and(Spline::is_zero) {
                continue;
            }
            views.push(SegmentView {
                id: views.len() as u32,
                line_view_id: *line_view,
                segment_id: segment.id,
                from_station_view_id: *from,
                to_station_view_id: *to,
                spline: spline.cloned(),
            });
        }
        views
    }

    fn make_transfer_views(&self) -> Vec<TransferView> {
        let mut views = Vec::new();
        for transfer in self.assembler.transfers.iter() {
            let from = self.station_view_index.get(&transfer.from_station_id);
            let to = self.station_view_index.get(&transfer.to_station_id);
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };
            if transfer.is_invisible() {
                continue;
            }
            views.push(TransferView {
                id: views.len() as u32,
                transfer_id: transfer.id,
                from_station_view_id: *from,
                to_station_view_id: *to,
            });
        }
        views
    }

    fn finish(mut self, margin: i32) -> MapView {
        let mut view = mem::take(&mut self.view);
        let mut segments = self.make_segment_views();
        let transfers = self.make_transfer_views();
        let mut stations = mem::take(&mut self.station_views);

        if let Some(bounds) = bounds(&stations) {
            let (dx, dy) = (margin - bounds.left, margin - bounds.top);
            for station in stations.iter_mut() {
                station.point.offset(dx, dy);
                if let Some(rect) = station.name_rect.as_mut() {
                    rect.offset(dx, dy);
                }
            }
            for spline in segments.iter_mut().filter_map(|s| s.spline.as_mut()) {
                spline.offset(dx, dy);
            }
            view.width = view.width.max(bounds.width() + 2 * margin);
            view.height = view.height.max(bounds.height() + 2 * margin);
        }

        view.lines = mem::take(&mut self.line_views).into();
        view.stations = stations.into();
        view.segments = segments.into();
        view.transfers = transfers.into();
        view
    }
}

/// Bounding box of every station point and name rect.
fn bounds(stations: &[StationView]) -> Option<Rect> {
    let mut points = stations.iter().flat_map(|station| {
        let rect = station.name_rect.map(|rect| {
            [
                Point::new(rect.left, rect.top),
                Point::new(rect.right, rect.bottom),
            ]
        });
        std::iter::once(station.point).chain(rect.into_iter().flatten())
    });
    let first = points.next()?;
    let init = Rect::new(first.x, first.y, first.x, first.y);
    Some(points.fold(init, |acc, point| {
        Rect::new(
            acc.left.min(point.x),
            acc.top.min(point.y),
            acc.right.max(point.x),
            acc.bottom.max(point.y),
        )
    }))
}

impl SectionConsumer for ViewBuilder<'_, '_> {
    type Record = LineViewRecord;

    fn open(&mut self, directive: &Directive<'_>) -> Option<Self::Record> {
        if directive.section_starts_with("Options") || directive.section_is("AdditionalNodes") {
            return None;
        }
        let Some(line_id) = self.assembler.line_index.get(directive.section).copied() else {
            warn!(
                "View {} references unknown line {}",
                self.view.system_name, directive.section
            );
            return None;
        };
        let (line_color, label_color) = self
            .assembler
            .line_view_defaults
            .get(&line_id)
            .copied()
            .unwrap_or((Color::BLACK, Color::BLACK));
        Some(LineViewRecord {
            line_id,
            line_view: LineView {
                id: self.line_views.len() as u32,
                line_id,
                line_color,
                label_color,
                name_rect: None,
            },
            coordinates: Vec::new(),
            rects: Vec::new(),
            heights: Vec::new(),
        })
    }

    fn field(&mut self, record: Option<&mut Self::Record>, directive: &Directive<'_>) {
        let Some(record) = record else {
            if directive.section_starts_with("Options") {
                self.read_option(directive);
            } else if directive.section_is("AdditionalNodes") {
                self.read_additional_node(directive.value);
            }
            return;
        };
        let line_view = &mut record.line_view;
        if directive.key_is("Color") {
            line_view.line_color = parse_color(directive.value).unwrap_or(line_view.line_color);
        } else if directive.key_is("LabelsColor") {
            line_view.label_color = parse_color(directive.value).unwrap_or(line_view.label_color);
        } else if directive.key_is("Coordinates") {
            record.coordinates = parse_points(directive.value);
        } else if directive.key_is("Rects") {
            record.rects = parse_rects(directive.value);
        } else if directive.key_is("Heights") {
            record.heights = parse_int_array(directive.value);
        } else if directive.key_is("Rect") {
            line_view.name_rect = parse_rect(directive.value);
        }
    }

    fn close(&mut self, record: Self::Record) {
        self.make_station_views(&record);
        let line_view = record.line_view;
        self.assembler
            .line_view_defaults
            .entry(record.line_id)
            .or_insert((line_view.line_color, line_view.label_color));
        self.line_view_index.insert(record.line_id, line_view.id);
        self.line_views.push(line_view);
    }
}
