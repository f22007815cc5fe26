use criterion::{Criterion, criterion_group, criterion_main};
use std::{
    fmt::Write as _,
    hint::black_box,
    io::{Cursor, Write},
    time::Duration,
};
use transitmap::{
    model::{Model, References},
    pmz::Config,
    route::RouteParameters,
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

const LINES: usize = 12;
const STATIONS_PER_LINE: usize = 40;

/// A grid-like network: every line crosses the next one halfway through.
fn synthetic_archive() -> Vec<u8> {
    let mut trp = String::from("[Options]\nType=Metro\n\n");
    for line in 0..LINES {
        let stations: Vec<_> = (0..STATIONS_PER_LINE)
            .map(|i| format!("S{line}-{i}"))
            .collect();
        let driving: Vec<_> = (1..STATIONS_PER_LINE)
            .map(|i| format!("({},{})", 60 + i % 7, 60 + i % 5))
            .collect();
        let _ = write!(
            trp,
            "[Line {line}]\nName=L{line}\nStations={}\nDriving={}\nDelays=30,90\n\n",
            stations.join(","),
            driving.join(","),
        );
    }
    trp.push_str("[Transfers]\n");
    for line in 1..LINES {
        let _ = writeln!(
            trp,
            "{line}=L{},S{}-{},L{line},S{line}-{},120",
            line - 1,
            line - 1,
            STATIONS_PER_LINE / 2,
            STATIONS_PER_LINE / 2,
        );
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let entries = [
        ("bench.cty", "[Options]\nCityName=Bench\nCountry=Bench\n".to_string()),
        ("metro.trp", trp),
    ];
    for (name, text) in entries {
        writer.start_file(name, options).expect("Failed to add entry");
        writer
            .write_all(text.as_bytes())
            .expect("Failed to write entry");
    }
    writer
        .finish()
        .expect("Failed to finish archive")
        .into_inner()
}

fn import(bytes: &[u8]) -> Model {
    Model::from_pmz_reader(
        Cursor::new(bytes),
        "bench.pmz",
        Config::default(),
        References::none(),
    )
    .expect("Failed to import archive")
}

fn criterion_benchmark(c: &mut Criterion) {
    let bytes = synthetic_archive();
    let model = import(&bytes);
    let transports = model.all_transports();
    let last = model.stations.len() as u32 - 1;
    let short = RouteParameters::new(0, STATIONS_PER_LINE as u32 - 1, transports.clone());
    let long = RouteParameters::new(0, last, transports).with_delay_profile(1);

    let mut group = c.benchmark_group("Import");
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("Synthetic archive", |b| {
        b.iter(|| import(black_box(&bytes)))
    });
    group.finish();

    let mut group = c.benchmark_group("Routing");
    group.bench_function("Short route", |b| {
        b.iter(|| model.find_route(black_box(&short)))
    });
    group.bench_function("Long route", |b| {
        b.iter(|| model.find_route(black_box(&long)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
