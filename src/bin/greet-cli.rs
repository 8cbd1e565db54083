use clap::{Parser, ValueEnum};
use greeter_service::{say_hello, Greeting, Style};

#[derive(Parser)]
#[command(name = "greet-cli")]
#[command(about = "Print greetings from the command line", long_about = None)]
struct Cli {
    /// Name to greet. Without one, greets the world.
    name: Option<String>,

    /// Print only this style instead of the standard and formal pair.
    #[arg(short, long, value_enum)]
    style: Option<CliStyle>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliStyle {
    Standard,
    Formal,
    Enthusiastic,
}

impl From<CliStyle> for Style {
    fn from(style: CliStyle) -> Self {
        match style {
            CliStyle::Standard => Style::Standard,
            CliStyle::Formal => Style::Formal,
            CliStyle::Enthusiastic => Style::Enthusiastic,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let name = match cli.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => {
            println!("{}", say_hello(None));
            return Ok(());
        }
    };

    let greeting = match Greeting::new(name) {
        Ok(greeting) => greeting,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match cli.style {
        Some(style) => println!("{}", greeting.render(style.into())),
        None => {
            println!("{}", greeting.greet());
            println!("{}", greeting.greet_formal());
        }
    }
    Ok(())
}
