use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Client for the forwarding gateway", long_about = None)]
struct Cli {
    /// Base URL of a running gateway.
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured routing keys
    Targets,
    /// Forward through a configured routing key
    Fetch {
        key: String,
        /// Path suffix appended to the target URL
        #[arg(long)]
        path: Option<String>,
        /// Extra query parameter forwarded upstream (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Forward to an explicit URL with an explicit referrer
    Direct {
        #[arg(long)]
        target: String,
        #[arg(long)]
        referrer: String,
        #[arg(long)]
        path: Option<String>,
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Targets => client.get(format!("{}/", base)),
        Commands::Fetch { key, path, params } => {
            let mut query = vec![("get".to_string(), key)];
            query.extend(path.map(|p| ("path".to_string(), p)));
            query.extend(params);
            client.get(format!("{}/api", base)).query(&query)
        }
        Commands::Direct {
            target,
            referrer,
            path,
            params,
        } => {
            let mut query = vec![
                ("url".to_string(), target),
                ("referrer".to_string(), referrer),
            ];
            query.extend(path.map(|p| ("path".to_string(), p)));
            query.extend(params);
            client.get(format!("{}/test", base)).query(&query)
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    eprintln!("HTTP {}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
