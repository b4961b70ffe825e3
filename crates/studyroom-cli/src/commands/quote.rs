use studyroom_core::quotes::random_quote;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", random_quote());
    Ok(())
}
