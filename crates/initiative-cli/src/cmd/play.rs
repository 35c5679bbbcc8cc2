use crate::output::{print_json, print_table};
use crate::session::{tokenize, Outcome, PlayLine, Session};
use clap::Parser;
use initiative_core::{config::Config, snapshot::TimelineSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;

pub fn run(config: &Config, args: &[String], seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, args, rng);
    tracing::info!(
        subjects = session.timeline.subject_count(),
        actions = session.catalog.len(),
        "session started"
    );

    let stdin = std::io::stdin();
    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let Some(words) = tokenize(&line) else {
            continue;
        };
        let parsed = match PlayLine::try_parse_from(words) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("line {}: {}", lineno + 1, e.render().to_string().trim_end());
                continue;
            }
        };
        match session.execute(parsed.command) {
            Ok(Outcome::Done(message)) => {
                if !json {
                    println!("{message}");
                }
            }
            Ok(Outcome::Ignored(reason)) => {
                tracing::info!(line = lineno + 1, %reason, "command ignored");
            }
            Ok(Outcome::Show) => show(&session, json)?,
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("line {}: error: {e:#}", lineno + 1),
        }
    }

    show(&session, json)
}

fn show(session: &Session, json: bool) -> anyhow::Result<()> {
    let snapshot = TimelineSnapshot::capture(&session.timeline, &session.tokens);
    if json {
        return print_json(&snapshot);
    }

    println!("t={}s  turn={}s", snapshot.start_time, snapshot.turn_duration);
    let rows: Vec<Vec<String>> = snapshot
        .subjects
        .iter()
        .map(|s| {
            let queue: Vec<String> = s
                .actions
                .iter()
                .map(|b| {
                    let mark = if b.resolved { "*" } else { "" };
                    format!("[{}] {}{mark} {:.1}s", b.id, b.label, b.seconds)
                })
                .collect();
            vec![
                if s.selected { ">".to_string() } else { String::new() },
                s.index.to_string(),
                s.name.clone(),
                queue.join(" | "),
                s.tokens.join(","),
            ]
        })
        .collect();
    print_table(&["", "#", "SUBJECT", "QUEUE", "TOKENS"], rows);
    Ok(())
}
