fn main() -> miette::Result<()> {
    let file = std::env::args().nth(1).expect("Missing filename");
    println!("opening {file}");

    let dataset = forecast::load_dataset(&file)?;
    print!("{}", dataset.daily_summary()?);

    Ok(())
}
