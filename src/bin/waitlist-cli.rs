use clap::Parser;
use waitlist_sdk::{FormOutcome, WaitlistClient, WaitlistForm};

#[derive(Parser)]
#[command(name = "waitlist-cli")]
#[command(about = "Submit a waitlist signup the way the site form does", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080/submit")]
    url: String,

    #[arg(short, long)]
    email: String,

    #[arg(short, long, default_value = "")]
    company: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = WaitlistClient::new(&cli.url);
    let mut form = WaitlistForm::new(cli.email, cli.company);

    println!("[{}]", form.button().label());

    let outcome = form.submit(&client).await;
    if outcome == FormOutcome::Skipped {
        eprintln!("Error: not a valid email address, nothing sent");
        std::process::exit(2);
    }

    println!("[{}]", form.button().label());
    form.settle().await;
    println!("[{}]", form.button().label());

    if outcome == FormOutcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}
