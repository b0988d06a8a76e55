use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lectio::canon;
use lectio::clock::{Clock, SystemClock};
use lectio::plan::{self, aggregate, YearPlan};
use lectio::progress::{self, streak, ChapterState};
use lectio::store::{self, CompletionStore, JsonStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lectio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the completions file (defaults to the platform data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one day of the 365-day reading plan
    Plan {
        /// Day number (1-365)
        #[arg(short, long, default_value_t = 1)]
        day: u32,
    },
    /// Show where a reader should continue in the plan
    Today {
        /// Reader id
        user: String,
    },
    /// Mark a chapter as completed
    Complete {
        /// Reader id
        user: String,
        /// Book name (e.g. "Genesis")
        book: String,
        /// Chapter number
        chapter: u32,
    },
    /// Show the current reading streak
    Streak {
        /// Reader id
        user: String,
    },
    /// Show chapter-by-chapter progress through one book
    Progress {
        /// Reader id
        user: String,
        /// Book name (e.g. "Genesis")
        book: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let mut store = match &cli.store {
        Some(path) => JsonStore::open(path)?,
        None => JsonStore::open_default()?,
    };

    match cli.command {
        Commands::Plan { day } => show_plan_day(day),
        Commands::Today { user } => show_today(&store, &user),
        Commands::Complete { user, book, chapter } => complete(&mut store, &user, &book, chapter)?,
        Commands::Streak { user } => show_streak(&store, &user),
        Commands::Progress { user, book } => show_book_progress(&store, &user, &book),
    }

    Ok(())
}

fn show_plan_day(day_number: u32) {
    let plan = YearPlan::shared();
    let day = plan.day(day_number);
    let week = plan::week_of_day(day.day_number);
    println!(
        "Day {} (week {}, month {}):",
        day.day_number,
        week,
        plan::month_of_week(week)
    );
    for chapter in &day.chapters {
        println!("  {}", chapter);
    }
}

fn show_today(store: &dyn CompletionStore, user: &str) {
    let plan = YearPlan::shared();
    let reading = store::load_progress(store, user);

    match aggregate::first_incomplete_day(plan, &reading) {
        Some(day_number) => {
            let day = plan.day(day_number);
            let done = aggregate::day_progress(day, &reading);
            println!("Continue at day {} ({}/{} read):", day_number, done.done, done.total);
            for chapter in &day.chapters {
                let read = reading.completed_in(chapter.book).contains(&chapter.chapter);
                println!("  [{}] {}", if read { "x" } else { " " }, chapter);
            }
        }
        None => println!("The whole plan is finished."),
    }
}

fn complete(store: &mut dyn CompletionStore, user: &str, book: &str, chapter: u32) -> Result<()> {
    // Clamp like the engine does, so a typo'd chapter still lands somewhere
    // sensible.
    let chapter = chapter.clamp(1, canon::total_chapters(book));
    store.mark_chapter_completed(user, book, chapter)?;

    let completed = store::completed_or_empty(store, user, book);
    println!("Marked {} {} as read.", book, chapter);
    if progress::is_book_complete(book, &completed) {
        println!("{} is finished!", book);
    } else {
        println!("Next up: {} {}.", book, progress::current_chapter(book, &completed));
    }
    Ok(())
}

fn show_streak(store: &dyn CompletionStore, user: &str) {
    let reading = store::load_progress(store, user);
    let state = streak::compute_streak(&reading.activity, SystemClock.today());

    println!("Current streak: {} day(s)", state.current_streak);
    let strip: String =
        state.last_7_days.iter().map(|d| if d.completed { '#' } else { '.' }).collect();
    println!("Last 7 days:    {}", strip);
}

fn show_book_progress(store: &dyn CompletionStore, user: &str, book: &str) {
    let completed = store::completed_or_empty(store, user, book);
    let reading = store::load_progress(store, user);
    let summary = aggregate::book_progress(book, &reading);

    println!("{}: {}/{} chapters ({:.0}%)", book, summary.done, summary.total,
        summary.fraction() * 100.0);
    for chapter in 1..=canon::total_chapters(book) {
        let marker = match progress::chapter_state(book, chapter, &completed) {
            ChapterState::Completed => 'x',
            ChapterState::Current => '>',
            ChapterState::Locked => '.',
        };
        print!("{}", marker);
    }
    println!();
}
