//! Parsers for the scalar and list values found on the right-hand side of directives.

use csv::{ReaderBuilder, Trim};

use crate::shared::{Color, Point, Rect};

/// Splits a comma separated value. Double quotes protect embedded commas.
pub fn parse_string_array(value: &str) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(value.as_bytes());
    reader
        .records()
        .next()
        .and_then(|record| record.ok())
        .map(|record| record.iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Parses a delay token. Empty or unparsable tokens mean "unknown".
pub fn parse_delay(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if let Ok(value) = token.parse::<u32>() {
        return Some(value);
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.round() as u32)
}

pub fn parse_delay_array(value: &str) -> Vec<Option<u32>> {
    if value.trim().is_empty() {
        return vec![];
    }
    value.split(',').map(parse_delay).collect()
}

pub fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();
    value.parse::<i32>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.round() as i32)
    })
}

pub fn parse_int_or(value: &str, default: i32) -> i32 {
    parse_int(value).unwrap_or(default)
}

pub fn parse_int_array(value: &str) -> Vec<Option<i32>> {
    if value.trim().is_empty() {
        return vec![];
    }
    value.split(',').map(parse_int).collect()
}

pub fn parse_bool_or(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" => false,
        _ => default,
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_hex(value)
}

/// Parses `x1,y1,x2,y2,...` into points. A missing trailing coordinate reads as zero.
pub fn parse_points(value: &str) -> Vec<Point> {
    let values = parse_int_array(value);
    values
        .chunks(2)
        .map(|pair| {
            let x = pair.first().copied().flatten().unwrap_or(0);
            let y = pair.get(1).copied().flatten().unwrap_or(0);
            Point::new(x, y)
        })
        .collect()
}

/// Parses `x,y,width,height` groups. Zero rects carry no geometry and come back as `None`.
pub fn parse_rects(value: &str) -> Vec<Option<Rect>> {
    let values = parse_int_array(value);
    values
        .chunks(4)
        .map(|chunk| {
            let at = |i: usize| chunk.get(i).copied().flatten().unwrap_or(0);
            let rect = Rect::from_origin_size(at(0), at(1), at(2), at(3));
            (!rect.is_zero()).then_some(rect)
        })
        .collect()
}

pub fn parse_rect(value: &str) -> Option<Rect> {
    parse_rects(value).into_iter().next().flatten()
}

#[test]
fn string_array_test() {
    let parts = parse_string_array("Line 1, Station A ,\"Name, with comma\",,7");
    assert_eq!(
        parts,
        vec!["Line 1", "Station A", "Name, with comma", "", "7"]
    );
    assert!(parse_string_array("").is_empty());
}

#[test]
fn delay_test() {
    assert_eq!(parse_delay("5"), Some(5));
    assert_eq!(parse_delay(" 2.6 "), Some(3));
    assert_eq!(parse_delay(""), None);
    assert_eq!(parse_delay("x"), None);
    assert_eq!(parse_delay("-1"), None);
    assert_eq!(parse_delay_array("1,,3"), vec![Some(1), None, Some(3)]);
    assert!(parse_delay_array(" ").is_empty());
}

#[test]
fn bool_test() {
    assert!(parse_bool_or("1", false));
    assert!(!parse_bool_or("False", true));
    assert!(parse_bool_or("maybe", true));
}

#[test]
fn points_and_rects_test() {
    assert_eq!(
        parse_points("10,20,30,40,50"),
        vec![Point::new(10, 20), Point::new(30, 40), Point::new(50, 0)]
    );
    assert_eq!(
        parse_rects("1,2,3,4,0,0,0,0"),
        vec![Some(Rect::new(1, 2, 4, 6)), None]
    );
    assert_eq!(parse_rect("5,5,10,10"), Some(Rect::new(5, 5, 15, 15)));
    assert_eq!(parse_rect(""), None);
}
