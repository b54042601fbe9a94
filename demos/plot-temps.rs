use forecast::{fahrenheit_to_celsius, load_dataset, Record};
use plotters::prelude::*;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

fn day_of(record: &Record) -> chrono::NaiveDate {
    let date = OffsetDateTime::parse(&record.date, &Rfc3339).unwrap();
    chrono::NaiveDate::from_ymd_opt(date.year(), date.month() as u32, date.day() as u32).unwrap()
}

fn main() {
    let input = std::env::args().nth(1).expect("Missing filename");
    println!("opening {input}");
    let output = format!("{input}.png");

    let dataset = load_dataset(&input).unwrap();
    let range = dataset.temperature_range().expect("empty dataset");
    let range = fahrenheit_to_celsius(range.start)..fahrenheit_to_celsius(range.end);

    let first_day = day_of(dataset.records.first().unwrap());
    let last_day = day_of(dataset.records.last().unwrap());

    let root = BitMapBackend::new(&output, (1920, 1080)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption("Daily low and high temperatures", ("sans-serif", 100).into_font())
        .margin(5)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d(first_day..last_day, range)
        .unwrap();

    chart.configure_mesh().draw().unwrap();

    chart
        .draw_series(LineSeries::new(
            dataset
                .records
                .iter()
                .map(|record| (day_of(record), fahrenheit_to_celsius(record.high))),
            RED,
        ))
        .unwrap()
        .label("Maximum temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(LineSeries::new(
            dataset
                .records
                .iter()
                .map(|record| (day_of(record), fahrenheit_to_celsius(record.low))),
            BLUE,
        ))
        .unwrap()
        .label("Minimum temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .unwrap();

    root.present().unwrap();
}
