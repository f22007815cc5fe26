mod common;

use common::{ArchiveBuilder, station_id};
use transitmap::shared::{Color, Point, Rect};

const METRO_VIEW: &str = "\
[Options]
ImageFileName=metro.vec
StationDiameter=15
Transports=metro.trp,tram.trp,unknown.trp
CheckedTransports=metro.trp

[Красная]
Color=FF0000
LabelsColor=FFFFFF
Coordinates=100,100,200,100,0,0
Rects=90,80,40,10
Heights=5
Rect=10,10,50,20

[Синяя]
Color=0000FF
Coordinates=200,150,300,150

[Неизвестная]
Color=00FF00

[AdditionalNodes]
1=Синяя,Дельта,Эпсилон,250,140,Spline
2=Красная,Алфа,Бета
3=Красная,Алфа,Омега,1,1
";

const TRAM_VIEW: &str = "\
[Красная]
Coordinates=10,10,20,10,30,10
";

fn model_with_views() -> transitmap::model::Model {
    ArchiveBuilder::moscow()
        .text("tram.map", TRAM_VIEW)
        .text("metro.map", METRO_VIEW)
        .import()
}

#[test]
fn view_options_test() {
    let model = model_with_views();
    assert_eq!(model.views.len(), 2);
    let names: Vec<&str> = model.view_names.iter().map(|name| name.as_ref()).collect();
    assert_eq!(names, vec!["metro.map", "tram.map"]);
    let view = model.view_by_name("metro.map").unwrap();
    assert_eq!(view.background.as_deref(), Some("metro.vec"));
    assert_eq!(view.station_diameter, 15);
    assert_eq!(view.line_width, 9);
    assert!(view.upper_case);
    assert_eq!(view.transports.as_ref(), &[0, 1]);
    assert_eq!(view.transports_checked.as_ref(), &[0]);
}

#[test]
fn line_views_test() {
    let model = model_with_views();
    let view = &model.views[0];
    assert_eq!(view.lines.len(), 2);
    let red = &view.lines[0];
    assert_eq!(red.line_color, Color(0xFFFF_0000));
    assert_eq!(red.label_color, Color(0xFFFF_FFFF));
    assert_eq!(red.name_rect, Some(Rect::new(10, 10, 60, 30)));
    assert_eq!(view.lines[1].line_color, Color(0xFF00_00FF));
}

#[test]
fn line_colors_carry_over_test() {
    let model = model_with_views();
    let tram_view = model.view_by_name("tram.map").unwrap();
    assert_eq!(tram_view.lines.len(), 1);
    assert_eq!(tram_view.lines[0].line_color, Color(0xFFFF_0000));
    assert_eq!(tram_view.stations.len(), 3);
}

#[test]
fn station_views_test() {
    let model = model_with_views();
    let view = &model.views[0];
    // The zero position hides the third red station
    assert_eq!(view.stations.len(), 4);
    let gamma = station_id(&model, "Красная", "Гамма");
    assert!(view.station_view(gamma).is_none());

    let alpha = view.station_view(station_id(&model, "Красная", "Алфа")).unwrap();
    assert_eq!(alpha.height, Some(5));
    assert!(alpha.name_rect.is_some());
    let beta = view.station_view(station_id(&model, "Красная", "Бета")).unwrap();
    assert_eq!(beta.height, None);
    assert_eq!(beta.name_rect, None);
}

#[test]
fn segment_views_test() {
    let model = model_with_views();
    let view = &model.views[0];
    // Алфа -> Бета has a zero spline, Бета -> Гамма has no second station view
    assert_eq!(view.segments.len(), 2);
    let d = station_id(&model, "Синяя", "Дельта");
    let e = station_id(&model, "Синяя", "Эпсилон");
    let forward = model.segment_between(d, e).unwrap();
    let segment_view = view
        .segments
        .iter()
        .find(|segment| segment.segment_id == forward.id)
        .unwrap();
    let spline = segment_view.spline.as_ref().unwrap();
    assert!(spline.is_spline);
    assert_eq!(spline.points, vec![Point::new(240, 140)]);
    assert!(
        view.segments
            .iter()
            .filter(|segment| segment.segment_id != forward.id)
            .all(|segment| segment.spline.is_none())
    );
}

#[test]
fn transfer_views_test() {
    let model = model_with_views();
    let view = &model.views[0];
    assert_eq!(view.transfers.len(), 1);
    let transfer = &model.transfers[view.transfers[0].transfer_id as usize];
    assert_eq!(
        transfer.from_station_id,
        station_id(&model, "Красная", "Бета")
    );
}

#[test]
fn view_normalization_test() {
    let model = model_with_views();
    let view = &model.views[0];
    // Bounds span x 90..300 and y 80..150 before the shift
    assert_eq!(view.width, 210 + 160);
    assert_eq!(view.height, 70 + 160);
    let alpha = view.station_view(station_id(&model, "Красная", "Алфа")).unwrap();
    assert_eq!(alpha.point, Point::new(90, 100));
    assert_eq!(alpha.name_rect, Some(Rect::new(80, 80, 120, 90)));

    let left = view.stations.iter().map(|s| s.point.x).min().unwrap();
    assert!(left >= 80);
}

#[test]
fn view_ids_reference_model_test() {
    let model = model_with_views();
    for view in model.views.iter() {
        for station in view.stations.iter() {
            assert!((station.station_id as usize) < model.stations.len());
            assert!((station.line_view_id as usize) < view.lines.len());
        }
        for segment in view.segments.iter() {
            assert!((segment.segment_id as usize) < model.segments.len());
            assert!((segment.from_station_view_id as usize) < view.stations.len());
            assert!((segment.to_station_view_id as usize) < view.stations.len());
        }
    }
}

#[test]
fn forked_line_coordinates_follow_main_sequence_test() {
    let model = ArchiveBuilder::new()
        .text("city.cty", common::CITY)
        .text(
            "metro.trp",
            "[Line 1]\nName=Вилка\nStations=A,B(D),C,D\nDriving=1,(2),3,4\n",
        )
        .text("metro.map", "[Вилка]\nCoordinates=10,10,20,20,30,30,40,40\n")
        .import();
    let view = &model.views[0];
    assert_eq!(view.stations.len(), 4);
    let point = |name: &str| {
        view.station_view(station_id(&model, "Вилка", name))
            .unwrap()
            .point
    };
    // Shifted so the top left station sits on the margin
    assert_eq!(point("A"), Point::new(80, 80));
    assert_eq!(point("B"), Point::new(90, 90));
    assert_eq!(point("C"), Point::new(100, 100));
    assert_eq!(point("D"), Point::new(110, 110));
}

#[test]
fn reversed_zero_spline_hides_segment_test() {
    let model = ArchiveBuilder::moscow()
        .text(
            "metro.map",
            "[Красная]\nCoordinates=100,100,200,100,300,100\n\n[AdditionalNodes]\n1=Красная,Бета,Алфа\n",
        )
        .import();
    let alpha = station_id(&model, "Красная", "Алфа");
    let beta = station_id(&model, "Красная", "Бета");
    let gamma = station_id(&model, "Красная", "Гамма");
    assert!(model.segment_between(beta, alpha).is_none());

    let view = &model.views[0];
    let shown: Vec<u32> = view.segments.iter().map(|segment| segment.segment_id).collect();
    assert_eq!(shown, vec![model.segment_between(beta, gamma).unwrap().id]);
}
