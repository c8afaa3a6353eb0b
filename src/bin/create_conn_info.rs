use std::io::{self, BufRead, Write};
use std::path::Path;
use anyhow::Result;
use pleasanter_client::config::CONNECTION_INFO_FILE;
use pleasanter_client::ConnectionInfo;

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    let url = prompt("URL...")?;
    let api_key = prompt("APIKEY...")?;

    match ConnectionInfo::new(&url, &api_key) {
        Some(info) => {
            info.write_to(Path::new(CONNECTION_INFO_FILE))?;
            println!("Successfully");
        },
        None => println!("Failed."),
    }

    Ok(())
}
