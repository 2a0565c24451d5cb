//! Publish a message via a live server and print a connection token.
//!
//! Requires a running server — not run in CI.
//!
//! ```sh
//! cargo run -p centrifugo-client --example publish -- <URL> <API_KEY> <SECRET> <CHANNEL> [MESSAGE]
//! ```
//!
//! Or via environment variables:
//! ```sh
//! CENTRIFUGO_URL=http://localhost:8000 CENTRIFUGO_API_KEY=key CENTRIFUGO_SECRET=secret \
//!     cargo run -p centrifugo-client --example publish -- <CHANNEL> [MESSAGE]
//! ```

use centrifugo_client::{Client, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let env_url = std::env::var("CENTRIFUGO_URL").ok();

    let (url, api_key, secret, channel, message) = if let Some(ref url) = env_url {
        let api_key = std::env::var("CENTRIFUGO_API_KEY").unwrap_or_default();
        let secret =
            std::env::var("CENTRIFUGO_SECRET").map_err(|_| "CENTRIFUGO_SECRET is required")?;
        let channel = args.first().ok_or("usage: publish <CHANNEL> [MESSAGE]")?;
        (
            url.clone(),
            api_key,
            secret,
            channel.clone(),
            args.get(1).cloned(),
        )
    } else {
        let usage = "usage: publish <URL> <API_KEY> <SECRET> <CHANNEL> [MESSAGE]";
        let url = args.first().ok_or(usage)?;
        let api_key = args.get(1).ok_or(usage)?;
        let secret = args.get(2).ok_or(usage)?;
        let channel = args.get(3).ok_or(usage)?;
        (
            url.clone(),
            api_key.clone(),
            secret.clone(),
            channel.clone(),
            args.get(4).cloned(),
        )
    };

    let config = Config::new(url, api_key, secret)
        .token_issuer("publish-example")
        .token_ttl(3600);
    let client = Client::new(config)?;

    let text = message.unwrap_or_else(|| "hello from centrifugo-client".to_string());
    eprintln!("publishing into '{channel}' ...");

    let reply = client
        .publish(&channel, serde_json::json!({ "text": text }), None)
        .await?;
    match reply.failure() {
        Some(err) => eprintln!("[failure] method={} error={}", err.method, err.error),
        None => eprintln!("[ok] {:?}", reply.value()),
    }

    let token = client.connection_token("example-user")?;
    println!("{token}");

    Ok(())
}
