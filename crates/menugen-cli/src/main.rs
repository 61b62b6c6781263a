use std::sync::Arc;

use anyhow::{bail, Result};
use clap::ArgMatches;
use menugen::{
    ActionsService, Action, Config, ConfigKey, Course, CourseField, Document, Event, Generator,
    InvocationId, MenuClientManager, Outcome, EMBEDDED_PLAYER,
};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

mod cli;

fn init_logging(level: &str, format: &str) -> Result<()> {
    let level = level.parse::<tracing::Level>()?;
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

async fn build_generator(page: Arc<Mutex<Document>>) -> Result<Generator<Document>> {
    let client = MenuClientManager::get()?;
    let generator = Generator::attach(client, page)
        .await?
        .with_strategy(Config::fetch_strategy()?)
        .with_placeholder(Config::get(ConfigKey::Placeholder));

    Ok(generator)
}

fn print_menu(document: &Document, id: InvocationId) {
    println!("{id}");
    for course in Course::iter() {
        let title = document
            .inner_html(&course.region_id(CourseField::Title))
            .filter(|title| !title.is_empty())
            .unwrap_or("-");
        println!("  {course}: {title}");
    }
    if let Some(src) = document.attribute(EMBEDDED_PLAYER, "src") {
        println!("  playlist: {src}");
    }
}

async fn generate(matches: &ArgMatches) -> Result<()> {
    let cuisine = matches
        .get_one::<String>("cuisine")
        .cloned()
        .unwrap_or_default();
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("html");

    let mut document = Document::standard();
    if !document.choose(&cuisine) && !cuisine.trim().is_empty() {
        let options = document.options().into_iter().skip(1).collect::<Vec<String>>();
        bail!(format!(
            "Unknown cuisine '{cuisine}'\nPossible values are: {}",
            options.join(", ")
        ));
    }

    let page = Arc::new(Mutex::new(document));
    let generator = build_generator(page.clone()).await?;
    let outcome = generator.generate().await;

    let mut document = page.lock().await;
    for alert in document.take_alerts() {
        eprintln!("{alert}");
    }

    match outcome {
        Outcome::Rendered(report) => {
            for diagnostic in &report.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&*document)?);
            } else {
                print!("{}", document.to_html());
            }
            Ok(())
        }
        Outcome::Rejected => bail!("No cuisine selected"),
        Outcome::Failed(err) => bail!(err),
        Outcome::Superseded => Ok(()),
    }
}

async fn watch(matches: &ArgMatches) -> Result<()> {
    let quiet = matches.get_flag("quiet");
    let page = Arc::new(Mutex::new(Document::standard()));
    let generator = Arc::new(build_generator(page.clone()).await?);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let service = tokio::spawn(async move {
        ActionsService::start(generator, event_tx, &mut action_rx).await
    });

    // Ctrl-C tears the service down; it must not keep the channel open on its own.
    let interrupt_tx = action_tx.downgrade();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if let Some(tx) = interrupt_tx.upgrade() {
                let _ = tx.send(Action::Shutdown);
            }
        }
    });

    let reader_page = page.clone();
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let cuisine = line.trim();
            if !reader_page.lock().await.choose(cuisine) && !cuisine.is_empty() {
                tracing::warn!(cuisine, "unknown cuisine");
            }
            action_tx.send(Action::Generate)?;
        }

        Ok::<(), anyhow::Error>(())
    });

    while let Some(event) = event_rx.recv().await {
        match event {
            Event::GenerationStarted(id) => {
                tracing::debug!(invocation = %id, "generation started");
            }
            Event::GenerationFinished(id, outcome) => {
                let mut document = page.lock().await;
                for alert in document.take_alerts() {
                    eprintln!("{alert}");
                }

                match outcome {
                    Outcome::Rendered(report) => {
                        for diagnostic in &report.diagnostics {
                            eprintln!("warning: {diagnostic}");
                        }
                        if !quiet {
                            print_menu(&document, id);
                        }
                    }
                    Outcome::Failed(err) => eprintln!("{id}: {err}"),
                    Outcome::Rejected | Outcome::Superseded => {}
                }
            }
        }
    }

    service.await??;
    // After a Ctrl-C shutdown the reader is still parked on stdin.
    if reader.is_finished() {
        reader.await??;
    } else {
        reader.abort();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = cli::build();
    let matches = cmd.clone().get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("info");
    let log_format = matches
        .get_one::<String>("log-format")
        .map(String::as_str)
        .unwrap_or("text");
    init_logging(log_level, log_format)?;

    let mut arg_matches = vec![&matches];
    if let Some((_, sub_matches)) = matches.subcommand() {
        arg_matches.push(sub_matches);
    }
    Config::load(cmd.clone(), arg_matches).await?;

    match matches.subcommand() {
        Some(("generate", sub_matches)) => generate(sub_matches).await,
        Some(("watch", sub_matches)) => watch(sub_matches).await,
        Some(("config", _)) => {
            println!("{}", Config::serialize_default(cmd));
            Ok(())
        }
        _ => {
            cli::build().print_help()?;
            Ok(())
        }
    }
}
