use anyhow::{Context, Result};
use herbal_care::dataset::{DEFAULT_DATA_FILE, Table};
use herbal_care::wizard::{BANNER, Screen, Wizard, format_outcome};
use herbal_care::{ForestParams, RemedyModel};
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("herbal_care=info".parse().unwrap()),
        )
        .init();

    let table = Table::from_path(Path::new(DEFAULT_DATA_FILE))
        .with_context(|| format!("loading {DEFAULT_DATA_FILE} from the working directory"))?;

    println!("🧠 Training the remedy model...");
    let model = RemedyModel::train(table.records, &ForestParams::default())?;

    run(&model)
}

fn run(model: &RemedyModel) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut wizard = Wizard::new();

    loop {
        match wizard.screen() {
            Screen::Welcome => {
                println!("{BANNER}");
                println!("Welcome to Herbal Care");
                match prompt(&mut lines, "Press Enter to get started (or type 'exit'): ")? {
                    Some(line) if line.eq_ignore_ascii_case("exit") => break,
                    Some(_) => wizard.start(),
                    None => break,
                }
            }
            Screen::Input => {
                println!("{BANNER}");
                let Some(condition) =
                    prompt(&mut lines, "Enter your symptoms (e.g., headache, fever): ")?
                else {
                    break;
                };
                let Some(age_group) =
                    prompt(&mut lines, "Enter your age group (e.g., Adults, Teens, Children): ")?
                else {
                    break;
                };
                let Some(diet) =
                    prompt(&mut lines, "Enter your dietary preferences (e.g., Vegan, None): ")?
                else {
                    break;
                };
                wizard.condition = condition;
                wizard.age_group = age_group;
                wizard.dietary_preferences = diet;
                wizard.submit(model)?;
            }
            Screen::Result => {
                match wizard.outcome() {
                    Some(outcome) => println!("\n{}\n", format_outcome(outcome)),
                    None => println!("\nYour remedy will appear here.\n"),
                }
                match prompt(&mut lines, "Type 'b' to go back to input, or 'exit' to quit: ")? {
                    Some(line) if line.eq_ignore_ascii_case("b") => wizard.back(),
                    Some(line) if line.eq_ignore_ascii_case("exit") => break,
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }

    println!("🌿 Take care!");
    Ok(())
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}
