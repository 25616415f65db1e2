//! Strongest race session of every week of a season.
//!
//! ```sh
//! IR_USERNAME=me@example.com IR_PASSWORD=secret cargo run --example season_sof --features tracing-subscriber
//! ```

use irwebstats_rs::IrClient;

const SEASON: i64 = 1708;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let username = std::env::var("IR_USERNAME")?;
    let password = std::env::var("IR_PASSWORD")?;

    let client = IrClient::builder()
        .credentials(username, password)
        .session_file(".ir_session")
        .build()?;

    if let Err(e) = client.login().await {
        eprintln!("Couldn't log in to the iRacing members site: {e}");
        std::process::exit(1);
    }

    for week in 1..=12 {
        let sessions = client.race_sessions(SEASON, week).await?;
        let strongest = sessions
            .iter()
            .filter_map(|s| Some((s.get("strengthoffield")?.as_i64()?, s.get("sessionid")?)))
            .max_by_key(|(sof, _)| *sof);

        if let Some((sof, session)) = strongest {
            println!("SOF for week {week}: session {session} sof {sof}");
        }
    }
    Ok(())
}
