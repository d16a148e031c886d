use anyhow::Result;
use std::fs;
use std::fs::File;
use std::io::{stdin, Read, Write};

#[macro_use]
extern crate clap;
use clap::App;

use jsontree::{parse, serialize};

fn main() -> Result<()> {
    let yaml = load_yaml!("main.yml");
    let matches = App::from_yaml(yaml).get_matches();
    if let Some(path) = matches.value_of_os("json_file") {
        let text = fs::read_to_string(path)?;
        let result = format(&text)?;
        if matches.is_present("in_place") {
            let mut f = File::create(path)?;
            writeln!(f, "{}", result)?;
        } else {
            println!("{}", result);
        }
    } else {
        let stdin = stdin();
        let mut reader = stdin.lock();
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let result = format(&text)?;
        println!("{}", result);
    }
    Ok(())
}

fn format(text: &str) -> Result<String> {
    let value = parse(text)?;
    Ok(serialize(&value))
}
