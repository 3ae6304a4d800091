use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "ridehail-cli")]
#[command(about = "Management CLI for the ridehail backend", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// List all rides
    Rides,
    /// Register a user
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to "customer" when omitted
        #[arg(long)]
        role: Option<String>,
    },
    /// Log in and print the user id
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Set a driver's availability
    Availability {
        /// Driver id as returned at registration
        id: String,
        #[arg(long)]
        available: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Rides => {
            let res = client.get(format!("{}/rides", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Register { name, email, password, role } => {
            let mut body = json!({
                "name": name,
                "email": email,
                "password": password,
            });
            if let Some(role) = role {
                body["role"] = json!(role);
            }
            let res = client
                .post(format!("{}/users", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Login { email, password } => {
            let res = client
                .post(format!("{}/auth/login", cli.url))
                .json(&json!({"email": email, "password": password}))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Availability { id, available } => {
            let res = client
                .patch(format!("{}/drivers/{}/status", cli.url, id))
                .json(&json!({"availability": available}))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
